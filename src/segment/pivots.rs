use crate::{
    foundation::core::{PixelRect, Point},
    rig::skeleton::{Joint, PivotTable},
    segment::bands::SegmentBands,
};

/// Derive joint pivots from the same band lines the segmenter uses.
///
/// Pivots and part boundaries are computed independently but from one set of lines, so a
/// shoulder pivot always sits on the head/shoulder boundary and knees on the knee line.
/// `None` bounds (nothing visible) yields an empty table.
pub fn derive_pivots(bounds: Option<PixelRect>, bands: &SegmentBands) -> PivotTable {
    let mut pivots = PivotTable::new();
    let Some(bounds) = bounds else {
        return pivots;
    };
    let l = bands.resolve(bounds);

    pivots.insert(Joint::Neck, Point::new(l.center_x, l.head_y));
    pivots.insert(
        Joint::LeftShoulder,
        Point::new(l.center_x - l.shoulder_spread, l.head_y),
    );
    pivots.insert(
        Joint::RightShoulder,
        Point::new(l.center_x + l.shoulder_spread, l.head_y),
    );
    pivots.insert(
        Joint::LeftHip,
        Point::new(l.center_x - l.hip_spread, l.hip_y),
    );
    pivots.insert(
        Joint::RightHip,
        Point::new(l.center_x + l.hip_spread, l.hip_y),
    );
    pivots.insert(
        Joint::LeftKnee,
        Point::new(l.center_x - l.hip_spread, l.knee_y),
    );
    pivots.insert(
        Joint::RightKnee,
        Point::new(l.center_x + l.hip_spread, l.knee_y),
    );
    pivots
}

#[cfg(test)]
#[path = "../../tests/unit/segment/pivots.rs"]
mod tests;
