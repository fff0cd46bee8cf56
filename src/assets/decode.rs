use std::path::Path;

use anyhow::Context;

use crate::{assets::raster::RasterImage, foundation::error::RigResult};

/// Decode encoded image bytes (PNG, GIF, ...) into a straight-alpha [`RasterImage`].
///
/// Alpha is left unpremultiplied so palette extraction sees the authored colors exactly.
pub fn decode_raster(bytes: &[u8]) -> RigResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_rgba8(width, height, rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_raster(path: impl AsRef<Path>) -> RigResult<RasterImage> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read image from '{}'", path.display()))?;
    decode_raster(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
