use std::path::Path;

use anyhow::Context;

use crate::{
    assets::raster::RasterImage,
    foundation::{
        core::ALPHA_THRESHOLD,
        error::{RigError, RigResult},
    },
};

/// A rendered frame as straight-alpha RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Frame {
    /// A fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// RGBA8 at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// `true` when no pixel is visible.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] < ALPHA_THRESHOLD)
    }

    /// Number of visible pixels.
    pub fn opaque_count(&self) -> usize {
        self.data
            .chunks_exact(4)
            .filter(|px| px[3] >= ALPHA_THRESHOLD)
            .count()
    }

    /// Reinterpret as a raster (e.g. to re-segment a rendered pose).
    pub fn to_raster(&self) -> RigResult<RasterImage> {
        RasterImage::from_rgba8(self.width, self.height, self.data.clone())
    }

    /// Encode as PNG at `path`, creating parent directories.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RigResult<()> {
        save_rgba8_png(path.as_ref(), &self.data, self.width, self.height)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        ((y as usize * self.width as usize) + x as usize) * 4
    }
}

pub(crate) fn save_rgba8_png(path: &Path, data: &[u8], width: u32, height: u32) -> RigResult<()> {
    if width == 0 || height == 0 {
        return Err(RigError::validation("cannot encode an empty image"));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        data,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
