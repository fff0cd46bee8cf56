//! Frequency-ordered color tables.

use std::collections::HashMap;

use crate::{
    assets::raster::RasterImage,
    foundation::core::Rgb,
    foundation::error::{RigError, RigResult},
};

/// Ordered, deduplicated foreground colors. Index 0 is the most frequent color.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette from explicit colors (hand-authored characters).
    ///
    /// Colors must be unique; order is kept as given.
    pub fn from_colors(colors: Vec<Rgb>) -> RigResult<Self> {
        let mut seen = HashMap::with_capacity(colors.len());
        for (i, c) in colors.iter().enumerate() {
            if let Some(prev) = seen.insert(*c, i) {
                return Err(RigError::validation(format!(
                    "palette color {} appears at index {prev} and {i}",
                    c.to_hex()
                )));
            }
        }
        Ok(Self { colors })
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// `true` when the source had no visible pixels.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`, if present.
    pub fn get(&self, index: u32) -> Option<Rgb> {
        self.colors.get(index as usize).copied()
    }

    /// All colors in rank order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Build the reverse lookup for this palette.
    pub fn index(&self) -> ColorIndex {
        ColorIndex {
            by_rgb: self
                .colors
                .iter()
                .enumerate()
                .map(|(i, c)| (*c, i as u32))
                .collect(),
        }
    }
}

/// Direct `Rgb -> palette rank` lookup.
#[derive(Clone, Debug, Default)]
pub struct ColorIndex {
    by_rgb: HashMap<Rgb, u32>,
}

impl ColorIndex {
    /// Palette index of `color`, or `None` if it is not in the palette.
    pub fn get(&self, color: Rgb) -> Option<u32> {
        self.by_rgb.get(&color).copied()
    }

    /// Number of indexed colors.
    pub fn len(&self) -> usize {
        self.by_rgb.len()
    }

    /// `true` when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_rgb.is_empty()
    }
}

/// Per-color pixel count, in palette order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCount {
    /// The color.
    pub color: Rgb,
    /// Foreground pixels with exactly this color.
    pub pixels: u64,
}

/// Scan every foreground pixel and rank distinct colors by descending frequency.
///
/// Ties keep the row-major first-seen order, so the result never depends on hash iteration.
pub fn extract_palette(raster: &RasterImage) -> (Palette, ColorIndex) {
    let counts = color_histogram(raster);
    let palette = Palette {
        colors: counts.iter().map(|c| c.color).collect(),
    };
    let index = palette.index();
    (palette, index)
}

/// Same ranking as [`extract_palette`], with the counts kept.
pub fn color_histogram(raster: &RasterImage) -> Vec<ColorCount> {
    let mut slot_by_rgb = HashMap::<Rgb, usize>::new();
    let mut counts = Vec::<ColorCount>::new();

    for y in 0..raster.height() {
        for x in 0..raster.width() {
            if !raster.is_opaque(x, y) {
                continue;
            }
            let color = raster.rgb(x, y);
            match slot_by_rgb.get(&color) {
                Some(&slot) => counts[slot].pixels += 1,
                None => {
                    slot_by_rgb.insert(color, counts.len());
                    counts.push(ColorCount { color, pixels: 1 });
                }
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.pixels.cmp(&a.pixels));
    counts
}

#[cfg(test)]
#[path = "../tests/unit/palette.rs"]
mod tests;
