use crate::foundation::{
    core::PixelRect,
    error::{RigError, RigResult},
    math::StableHasher,
};

/// Per-character segmentation bands, as fractions of the opaque bounding box.
///
/// The fractions are tuned by eye for each character and do not generalize to arbitrary
/// silhouettes. Vertical lines are measured from the top of the box, horizontal offsets from
/// its left edge (`center`) or from the center line (margins and spreads).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentBands {
    /// Head/shoulder line. Pixels above it are `Head`.
    pub head_line: f64,
    /// Hip line. Pixels at or below it are legs.
    pub hip_line: f64,
    /// Knee line splitting thighs from shins.
    pub knee_line: f64,
    /// Vertical center line.
    pub center: f64,
    /// Half-width of the torso column between the head and hip lines.
    pub arm_margin: f64,
    /// Horizontal shoulder pivot offset from the center line.
    pub shoulder_spread: f64,
    /// Horizontal hip and knee pivot offset from the center line.
    pub hip_spread: f64,
}

impl Default for SegmentBands {
    fn default() -> Self {
        Self {
            head_line: 0.28,
            hip_line: 0.58,
            knee_line: 0.79,
            center: 0.5,
            arm_margin: 0.2,
            shoulder_spread: 0.2,
            hip_spread: 0.11,
        }
    }
}

impl SegmentBands {
    /// Check ordering and ranges: `0 <= head <= hip <= knee <= 1`, `0 <= center <= 1`,
    /// non-negative margins, everything finite.
    pub fn validate(&self) -> RigResult<()> {
        let fields = [
            ("headLine", self.head_line),
            ("hipLine", self.hip_line),
            ("kneeLine", self.knee_line),
            ("center", self.center),
            ("armMargin", self.arm_margin),
            ("shoulderSpread", self.shoulder_spread),
            ("hipSpread", self.hip_spread),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(RigError::validation(format!(
                    "segment band '{name}' must be finite and >= 0, got {v}"
                )));
            }
        }
        if self.center > 1.0 {
            return Err(RigError::validation("segment band 'center' must be <= 1"));
        }
        if !(self.head_line <= self.hip_line
            && self.hip_line <= self.knee_line
            && self.knee_line <= 1.0)
        {
            return Err(RigError::validation(
                "segment bands must satisfy headLine <= hipLine <= kneeLine <= 1",
            ));
        }
        Ok(())
    }

    /// Convert fractions to absolute pixel positions for `bounds`.
    pub fn resolve(&self, bounds: PixelRect) -> BandLines {
        let w = f64::from(bounds.width);
        let h = f64::from(bounds.height);
        let top = f64::from(bounds.y);
        BandLines {
            head_y: top + self.head_line * h,
            hip_y: top + self.hip_line * h,
            knee_y: top + self.knee_line * h,
            center_x: f64::from(bounds.x) + self.center * w,
            arm_margin: self.arm_margin * w,
            shoulder_spread: self.shoulder_spread * w,
            hip_spread: self.hip_spread * w,
        }
    }

    pub(crate) fn write_identity(&self, h: &mut StableHasher) {
        for v in [
            self.head_line,
            self.hip_line,
            self.knee_line,
            self.center,
            self.arm_margin,
            self.shoulder_spread,
            self.hip_spread,
        ] {
            h.write_f64(v);
        }
    }
}

/// [`SegmentBands`] resolved against a concrete bounding box, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandLines {
    /// Head/shoulder line y.
    pub head_y: f64,
    /// Hip line y.
    pub hip_y: f64,
    /// Knee line y.
    pub knee_y: f64,
    /// Center line x.
    pub center_x: f64,
    /// Torso half-width.
    pub arm_margin: f64,
    /// Shoulder pivot offset from the center line.
    pub shoulder_spread: f64,
    /// Hip/knee pivot offset from the center line.
    pub hip_spread: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/segment/bands.rs"]
mod tests;
