use std::sync::Arc;

use crate::foundation::{
    core::{ALPHA_THRESHOLD, PixelRect, Rgb},
    error::{RigError, RigResult},
    math::{Fingerprint, StableHasher},
};

/// Immutable straight-alpha RGBA8 raster, row-major and tightly packed.
///
/// Cloning is cheap: the pixel buffer is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap an RGBA8 buffer. The buffer length must equal `width * height * 4`.
    ///
    /// Zero-sized rasters are accepted and behave as fully transparent.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> RigResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| RigError::validation("raster dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(RigError::validation(format!(
                "raster buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// A fully transparent raster of the given size.
    pub fn transparent(width: u32, height: u32) -> RigResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| RigError::validation("raster dimensions overflow"))?;
        Self::from_rgba8(width, height, vec![0; len])
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.rgba8.as_slice()
    }

    /// RGBA8 value at `(x, y)`. Panics when out of bounds.
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.rgba8[i],
            self.rgba8[i + 1],
            self.rgba8[i + 2],
            self.rgba8[i + 3],
        ]
    }

    /// Exact color at `(x, y)`, ignoring alpha.
    pub fn rgb(&self, x: u32, y: u32) -> Rgb {
        let [r, g, b, _] = self.rgba(x, y);
        Rgb::new(r, g, b)
    }

    /// `true` when the pixel is foreground (alpha at or above [`ALPHA_THRESHOLD`]).
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        self.rgba8[self.offset(x, y) + 3] >= ALPHA_THRESHOLD
    }

    /// Number of foreground pixels.
    pub fn opaque_pixel_count(&self) -> usize {
        self.rgba8
            .chunks_exact(4)
            .filter(|px| px[3] >= ALPHA_THRESHOLD)
            .count()
    }

    /// Tight bounding box of foreground pixels, or `None` when nothing is visible.
    pub fn opaque_bounds(&self) -> Option<PixelRect> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut any = false;
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_opaque(x, y) {
                    continue;
                }
                any = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
        any.then(|| PixelRect::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// Content fingerprint over dimensions and pixel bytes.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut h = StableHasher::new();
        self.write_identity(&mut h);
        h.finish()
    }

    pub(crate) fn write_identity(&self, h: &mut StableHasher) {
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(self.as_bytes());
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} raster",
            self.width,
            self.height
        );
        ((y as usize * self.width as usize) + x as usize) * 4
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/raster.rs"]
mod tests;
