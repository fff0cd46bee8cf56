use crate::{
    assets::raster::RasterImage,
    foundation::{core::PixelRect, error::RigResult},
    rig::skeleton::PartId,
    segment::bands::{BandLines, SegmentBands},
};

/// Total pixel -> part assignment for one raster.
///
/// Foreground pixels carry exactly one [`PartId`]; background pixels carry `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartMap {
    width: u32,
    height: u32,
    bounds: Option<PixelRect>,
    parts: Vec<Option<PartId>>,
}

impl PartMap {
    /// Width of the segmented raster.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the segmented raster.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Opaque bounding box the bands were resolved against.
    pub fn bounds(&self) -> Option<PixelRect> {
        self.bounds
    }

    /// Part at `(x, y)`, `None` for background or out of range.
    pub fn get(&self, x: u32, y: u32) -> Option<PartId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.parts[(y as usize * self.width as usize) + x as usize]
    }

    /// Number of pixels assigned to `part`.
    pub fn count(&self, part: PartId) -> usize {
        self.parts.iter().filter(|p| **p == Some(part)).count()
    }

    /// Number of pixels assigned to any part.
    pub fn assigned(&self) -> usize {
        self.parts.iter().filter(|p| p.is_some()).count()
    }

    /// Pixel coordinates of `part` in row-major order.
    pub fn pixels_of(&self, part: PartId) -> Vec<(u32, u32)> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) == Some(part) {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

/// Classify one pixel by its center against resolved band lines.
pub fn classify(lines: &BandLines, x: u32, y: u32) -> PartId {
    let cx = f64::from(x) + 0.5;
    let cy = f64::from(y) + 0.5;

    if cy < lines.head_y {
        return PartId::Head;
    }
    if cy < lines.hip_y {
        if cx < lines.center_x - lines.arm_margin {
            return PartId::LeftArm;
        }
        if cx > lines.center_x + lines.arm_margin {
            return PartId::RightArm;
        }
        return PartId::Torso;
    }

    let left = cx < lines.center_x;
    let thigh = cy < lines.knee_y;
    match (left, thigh) {
        (true, true) => PartId::LeftThigh,
        (true, false) => PartId::LeftShin,
        (false, true) => PartId::RightThigh,
        (false, false) => PartId::RightShin,
    }
}

/// Split a single upright biped silhouette into the eight rigid parts.
///
/// Bands are resolved against the tight opaque bounding box. A fully transparent or empty
/// raster yields a map with no assignments.
#[tracing::instrument(skip(raster), fields(width = raster.width(), height = raster.height()))]
pub fn segment(raster: &RasterImage, bands: &SegmentBands) -> RigResult<PartMap> {
    bands.validate()?;

    let width = raster.width();
    let height = raster.height();
    let mut parts = vec![None; width as usize * height as usize];
    let bounds = raster.opaque_bounds();

    if let Some(b) = bounds {
        let lines = bands.resolve(b);
        for y in b.y..b.bottom() {
            for x in b.x..b.right() {
                if raster.is_opaque(x, y) {
                    parts[(y as usize * width as usize) + x as usize] =
                        Some(classify(&lines, x, y));
                }
            }
        }
    }

    let map = PartMap {
        width,
        height,
        bounds,
        parts,
    };
    tracing::debug!(assigned = map.assigned(), ?bounds, "segmented raster");
    Ok(map)
}

#[cfg(test)]
#[path = "../../tests/unit/segment/segmenter.rs"]
mod tests;
