use std::collections::HashMap;

use crate::{
    assets::raster::RasterImage,
    foundation::core::{PixelRect, Rgb},
    foundation::error::{RigError, RigResult},
    palette::{ColorIndex, Palette},
    rig::skeleton::PartId,
    segment::segmenter::PartMap,
};

/// Solid axis-aligned rectangle in unscaled source coordinates.
///
/// Serialized compactly as `[color, x, y, width, height]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u32; 5]", into = "[u32; 5]")]
pub struct DrawCommand {
    /// Palette index.
    pub color: u32,
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DrawCommand {
    /// Construct a command.
    pub const fn new(color: u32, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            color,
            x,
            y,
            width,
            height,
        }
    }

    /// Covered pixel rectangle.
    pub fn rect(self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.width, self.height)
    }

    /// Number of covered pixels.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl From<[u32; 5]> for DrawCommand {
    fn from([color, x, y, width, height]: [u32; 5]) -> Self {
        Self::new(color, x, y, width, height)
    }
}

impl From<DrawCommand> for [u32; 5] {
    fn from(c: DrawCommand) -> Self {
        [c.color, c.x, c.y, c.width, c.height]
    }
}

/// Ordered draw commands for each of the eight parts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartCommands {
    by_part: [Vec<DrawCommand>; 8],
}

impl PartCommands {
    /// Commands for `part`, in paint order.
    pub fn get(&self, part: PartId) -> &[DrawCommand] {
        &self.by_part[part.index()]
    }

    /// Replace the commands for `part`.
    pub fn set(&mut self, part: PartId, commands: Vec<DrawCommand>) {
        self.by_part[part.index()] = commands;
    }

    /// `(part, commands)` pairs in [`PartId::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (PartId, &[DrawCommand])> + '_ {
        PartId::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Total number of commands across parts.
    pub fn total(&self) -> usize {
        self.by_part.iter().map(Vec::len).sum()
    }

    /// `true` when no part has any command.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Pixel and command counts for one part or a whole character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CompressionStats {
    /// Pixels covered.
    pub pixels: u64,
    /// Commands emitted.
    pub commands: u64,
}

impl CompressionStats {
    /// Measure a command list.
    pub fn of(commands: &[DrawCommand]) -> Self {
        Self {
            pixels: commands.iter().map(|c| c.area()).sum(),
            commands: commands.len() as u64,
        }
    }

    /// Average pixels per command; `0.0` when empty.
    pub fn pixels_per_command(self) -> f64 {
        if self.commands == 0 {
            0.0
        } else {
            self.pixels as f64 / self.commands as f64
        }
    }
}

impl std::ops::Add for CompressionStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            pixels: self.pixels + rhs.pixels,
            commands: self.commands + rhs.commands,
        }
    }
}

/// Losslessly decompose each part's pixels into solid rectangles.
///
/// Pass 1 emits one height-1 command per maximal horizontal run of equal part and color.
/// Pass 2 stacks runs with identical `(color, x, width)` whose rows touch. Every assigned pixel
/// ends up in exactly one command; the output of each part is ordered by `(y, x)`.
#[tracing::instrument(skip_all, fields(width = raster.width(), height = raster.height()))]
pub fn compress_parts(
    raster: &RasterImage,
    map: &PartMap,
    index: &ColorIndex,
) -> RigResult<PartCommands> {
    if map.width() != raster.width() || map.height() != raster.height() {
        return Err(RigError::validation(format!(
            "part map is {}x{} but raster is {}x{}",
            map.width(),
            map.height(),
            raster.width(),
            raster.height()
        )));
    }

    let mut runs: [Vec<DrawCommand>; 8] = Default::default();
    for y in 0..raster.height() {
        let mut x = 0;
        while x < raster.width() {
            let Some(part) = map.get(x, y) else {
                x += 1;
                continue;
            };
            let rgb = raster.rgb(x, y);
            let color = color_of(index, rgb)?;
            let start = x;
            x += 1;
            while x < raster.width() && map.get(x, y) == Some(part) && raster.rgb(x, y) == rgb {
                x += 1;
            }
            runs[part.index()].push(DrawCommand::new(color, start, y, x - start, 1));
        }
    }

    let mut out = PartCommands::default();
    for part in PartId::ALL {
        let merged = merge_vertical(&runs[part.index()]);
        tracing::debug!(
            part = part.name(),
            runs = runs[part.index()].len(),
            commands = merged.len(),
            "compressed part"
        );
        out.set(part, merged);
    }
    Ok(out)
}

/// Stack height-1 runs into taller rectangles.
///
/// `runs` must be in row-major order. Output keeps the order in which rectangles were opened,
/// which is `(y, x)` order of their top-left corners.
pub(crate) fn merge_vertical(runs: &[DrawCommand]) -> Vec<DrawCommand> {
    let mut out = Vec::<DrawCommand>::with_capacity(runs.len());
    let mut open = HashMap::<(u32, u32, u32), usize>::new();

    for run in runs {
        let key = (run.color, run.x, run.width);
        if let Some(&slot) = open.get(&key) {
            let cmd = &mut out[slot];
            if cmd.y + cmd.height == run.y {
                cmd.height += run.height;
                continue;
            }
        }
        open.insert(key, out.len());
        out.push(*run);
    }
    out
}

fn color_of(index: &ColorIndex, rgb: Rgb) -> RigResult<u32> {
    index.get(rgb).ok_or_else(|| {
        RigError::validation(format!(
            "color {} is not in the palette index",
            rgb.to_hex()
        ))
    })
}

/// Paint `commands` in order onto a transparent `width x height` raster.
///
/// Used to check the compressor and to preview authored parts.
pub fn replay_commands(
    commands: &[DrawCommand],
    palette: &Palette,
    width: u32,
    height: u32,
) -> RigResult<RasterImage> {
    let bounds = PixelRect::new(0, 0, width, height);
    let mut data = vec![0u8; width as usize * height as usize * 4];
    for cmd in commands {
        if !bounds.contains_rect(cmd.rect()) {
            return Err(RigError::validation(format!(
                "command {cmd:?} lies outside {width}x{height}"
            )));
        }
        let rgba = palette
            .get(cmd.color)
            .ok_or_else(|| {
                RigError::validation(format!("command color {} outside palette", cmd.color))
            })?
            .to_rgba8();
        for y in cmd.y..cmd.y + cmd.height {
            for x in cmd.x..cmd.x + cmd.width {
                let i = ((y as usize * width as usize) + x as usize) * 4;
                data[i..i + 4].copy_from_slice(&rgba);
            }
        }
    }
    RasterImage::from_rgba8(width, height, data)
}

#[cfg(test)]
#[path = "../../tests/unit/compress/rects.rs"]
mod tests;
