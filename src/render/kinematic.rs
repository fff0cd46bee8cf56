use crate::{
    compress::rects::DrawCommand,
    foundation::{
        core::{Affine, Point, Rect, Vec2},
        error::{RigError, RigResult},
        math::clamp_px,
    },
    palette::Palette,
    render::{
        frame::Frame,
        transform::{JointFrame, body_transform},
    },
    rig::{model::CharacterModel, pose::Pose, skeleton::PartId},
};

/// Output geometry for rendering one pose.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSettings {
    /// Output frame width in pixels.
    pub frame_width: u32,
    /// Output frame height in pixels.
    pub frame_height: u32,
    /// Uniform logical-to-output scale, applied last.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Logical offset of the source origin inside the frame, before scaling.
    #[serde(default)]
    pub origin: Vec2,
}

fn default_scale() -> f64 {
    1.0
}

impl RenderSettings {
    /// Frame exactly covering a `width x height` source at `scale`.
    ///
    /// Each side is at least one pixel, so an empty source still gets a transparent cell.
    pub fn fit(width: u32, height: u32, scale: f64) -> Self {
        let side = |v: u32| (f64::from(v) * scale).ceil().max(1.0) as u32;
        Self {
            frame_width: side(width),
            frame_height: side(height),
            scale,
            origin: Vec2::ZERO,
        }
    }

    /// Frame covering `model` at `scale`.
    pub fn for_model(model: &CharacterModel, scale: f64) -> Self {
        Self::fit(model.width(), model.height(), scale)
    }

    /// Reject empty frames and degenerate scales.
    pub fn validate(&self) -> RigResult<()> {
        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(RigError::validation(format!(
                "render frame must be non-empty, got {}x{}",
                self.frame_width, self.frame_height
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RigError::validation(format!(
                "render scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if !self.origin.x.is_finite() || !self.origin.y.is_finite() {
            return Err(RigError::validation("render origin must be finite"));
        }
        Ok(())
    }
}

/// Render one pose of `model` into a fresh frame.
///
/// Parts are painted back to front in [`PartId::DRAW_ORDER`]. Each part is transformed by the
/// joints of its chain, parent first, with the body offsets applied before any rotation and
/// the scale applied last. Output pixels are sampled at their centers (nearest neighbor).
/// A model without geometry yields a transparent frame.
pub fn render_pose(
    model: &CharacterModel,
    pose: &Pose,
    settings: &RenderSettings,
) -> RigResult<Frame> {
    settings.validate()?;
    let mut frame = Frame::transparent(settings.frame_width, settings.frame_height);
    if model.is_empty() {
        return Ok(frame);
    }

    let view = Affine::scale(settings.scale);
    let (dx, dy) = pose.body_offset();
    let body = body_transform(settings.origin, dx, dy);

    for part in PartId::DRAW_ORDER {
        let commands = model.commands(part);
        if commands.is_empty() {
            continue;
        }
        let xf = view * part_frame(model, pose, part, body).part_transform();
        paint(&mut frame, commands, model.palette(), xf)?;
    }
    Ok(frame)
}

/// Joint frame a part is drawn in, after walking its chain root first.
pub(crate) fn part_frame(
    model: &CharacterModel,
    pose: &Pose,
    part: PartId,
    body: Affine,
) -> JointFrame {
    let root = if part == PartId::Head {
        body * Affine::translate(Vec2::new(0.0, pose.head_offset()))
    } else {
        body
    };

    model
        .chain()
        .chain_for(part)
        .into_iter()
        .fold(JointFrame::root(root), |frame, joint| {
            match model.pivots().get(joint) {
                Some(pivot) => frame.enter(pivot, pose.angle(joint)),
                None => frame,
            }
        })
}

fn paint(
    frame: &mut Frame,
    commands: &[DrawCommand],
    palette: &Palette,
    xf: Affine,
) -> RigResult<()> {
    let det = xf.determinant();
    if det == 0.0 || !det.is_finite() {
        return Ok(());
    }
    let inv = xf.inverse();
    let (fw, fh) = (frame.width, frame.height);

    for cmd in commands {
        let rgba = palette
            .get(cmd.color)
            .ok_or_else(|| {
                RigError::validation(format!("command color {} outside palette", cmd.color))
            })?
            .to_rgba8();
        let local = Rect::new(
            f64::from(cmd.x),
            f64::from(cmd.y),
            f64::from(cmd.x) + f64::from(cmd.width),
            f64::from(cmd.y) + f64::from(cmd.height),
        );
        let bbox = xf.transform_rect_bbox(local);
        let (x0, x1) = (clamp_px(bbox.x0, fw), clamp_px(bbox.x1.ceil(), fw));
        let (y0, y1) = (clamp_px(bbox.y0, fh), clamp_px(bbox.y1.ceil(), fh));

        for py in y0..y1 {
            for px in x0..x1 {
                let p = inv * Point::new(f64::from(px) + 0.5, f64::from(py) + 0.5);
                if p.x >= local.x0 && p.x < local.x1 && p.y >= local.y0 && p.y < local.y1 {
                    frame.put(px, py, rgba);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/kinematic.rs"]
mod tests;
