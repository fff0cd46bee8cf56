use crate::{
    assets::raster::RasterImage,
    compress::rects::{CompressionStats, DrawCommand, PartCommands, compress_parts},
    foundation::{
        core::PixelRect,
        error::{RigError, RigResult},
        math::{Fingerprint, StableHasher},
    },
    palette::{Palette, extract_palette},
    rig::skeleton::{JointChain, PartId, PivotTable},
    segment::{bands::SegmentBands, pivots::derive_pivots, segmenter::segment},
};

/// Immutable, render-ready description of one character.
///
/// Built once (from a raster or from authored data) and shared read-only by every frame
/// render, usually behind an `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterModel {
    fingerprint: Fingerprint,
    width: u32,
    height: u32,
    palette: Palette,
    parts: PartCommands,
    pivots: PivotTable,
    chain: JointChain,
}

impl CharacterModel {
    /// Run palette extraction, segmentation, compression, and pivot derivation.
    #[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
    pub fn from_raster(raster: &RasterImage, bands: &SegmentBands) -> RigResult<Self> {
        let (palette, index) = extract_palette(raster);
        let map = segment(raster, bands)?;
        let parts = compress_parts(raster, &map, &index)?;
        let pivots = derive_pivots(map.bounds(), bands);

        let model = Self {
            fingerprint: raster_model_key(raster, bands),
            width: raster.width(),
            height: raster.height(),
            palette,
            parts,
            pivots,
            chain: JointChain::standard(),
        };
        let stats = model.total_stats();
        tracing::debug!(
            colors = model.palette.len(),
            pixels = stats.pixels,
            commands = stats.commands,
            "built character model"
        );
        Ok(model)
    }

    /// Assemble a model from explicit parts (hand-authored characters).
    ///
    /// Every command must reference a palette entry and lie inside `width x height`, and every
    /// part with commands needs pivots for its whole joint chain.
    pub fn from_parts(
        width: u32,
        height: u32,
        palette: Palette,
        parts: PartCommands,
        pivots: PivotTable,
    ) -> RigResult<Self> {
        let chain = JointChain::standard();
        let canvas = PixelRect::new(0, 0, width, height);
        for (part, commands) in parts.iter() {
            for cmd in commands {
                validate_command(part, cmd, &palette, canvas)?;
            }
            if commands.is_empty() {
                continue;
            }
            for joint in chain.chain_for(part) {
                if pivots.get(joint).is_none() {
                    return Err(RigError::validation(format!(
                        "part '{part}' needs a pivot for joint '{joint}'"
                    )));
                }
            }
        }

        let mut h = StableHasher::new();
        h.write_u8(b'A');
        h.write_u32(width);
        h.write_u32(height);
        for c in palette.colors() {
            h.write_bytes(&[c.r, c.g, c.b]);
        }
        for (part, commands) in parts.iter() {
            h.write_u8(part.index() as u8);
            h.write_u32(commands.len() as u32);
            for c in commands {
                for v in <[u32; 5]>::from(*c) {
                    h.write_u32(v);
                }
            }
        }
        for (joint, p) in pivots.iter() {
            h.write_u8(joint as u8);
            h.write_f64(p.x);
            h.write_f64(p.y);
        }

        Ok(Self {
            fingerprint: h.finish(),
            width,
            height,
            palette,
            parts,
            pivots,
            chain,
        })
    }

    /// Stable identity of the model's source data.
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Logical (unscaled) canvas width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical (unscaled) canvas height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color table.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Per-part draw commands.
    pub fn parts(&self) -> &PartCommands {
        &self.parts
    }

    /// Commands for one part.
    pub fn commands(&self, part: PartId) -> &[DrawCommand] {
        self.parts.get(part)
    }

    /// Joint pivots.
    pub fn pivots(&self) -> &PivotTable {
        &self.pivots
    }

    /// Joint hierarchy.
    pub fn chain(&self) -> &JointChain {
        &self.chain
    }

    /// `true` when nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Compression counts for one part.
    pub fn part_stats(&self, part: PartId) -> CompressionStats {
        CompressionStats::of(self.parts.get(part))
    }

    /// Compression counts summed over all parts.
    pub fn total_stats(&self) -> CompressionStats {
        PartId::ALL
            .into_iter()
            .map(|p| self.part_stats(p))
            .fold(CompressionStats::default(), |a, b| a + b)
    }
}

/// Cache key for a raster-derived model: content plus segmentation bands.
pub(crate) fn raster_model_key(raster: &RasterImage, bands: &SegmentBands) -> Fingerprint {
    let mut h = StableHasher::new();
    h.write_u8(b'R');
    raster.write_identity(&mut h);
    bands.write_identity(&mut h);
    h.finish()
}

fn validate_command(
    part: PartId,
    cmd: &DrawCommand,
    palette: &Palette,
    canvas: PixelRect,
) -> RigResult<()> {
    if cmd.rect().is_empty() {
        return Err(RigError::validation(format!(
            "part '{part}' has an empty command {cmd:?}"
        )));
    }
    if palette.get(cmd.color).is_none() {
        return Err(RigError::validation(format!(
            "part '{part}' command uses color {} but the palette has {} entries",
            cmd.color,
            palette.len()
        )));
    }
    let fits = cmd.x.checked_add(cmd.width).is_some()
        && cmd.y.checked_add(cmd.height).is_some()
        && canvas.contains_rect(cmd.rect());
    if !fits {
        return Err(RigError::validation(format!(
            "part '{part}' command {cmd:?} lies outside {}x{}",
            canvas.width, canvas.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/rig/model.rs"]
mod tests;
