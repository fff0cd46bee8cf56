use std::collections::BTreeMap;

use crate::{
    foundation::math::{Fingerprint, StableHasher},
    rig::skeleton::Joint,
};

/// One animation frame's skeleton configuration.
///
/// Serialized as a flat object: joint names map to radians, alongside the optional
/// `bodyDx`/`bodyDy`/`headDy` pixel offsets. Joints that are absent, unknown, or not finite
/// contribute no rotation, so poses may be partial.
///
/// ```json
/// { "leftHip": 0.4, "leftKnee": -0.6, "bodyDy": -1 }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Horizontal whole-body offset in source pixels.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub body_dx: f64,
    /// Vertical whole-body offset in source pixels.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub body_dy: f64,
    /// Extra vertical head offset, applied on top of the body offset.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub head_dy: f64,
    /// Joint angles in radians, keyed by joint name.
    #[serde(flatten)]
    pub joints: BTreeMap<String, f64>,
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}

impl Pose {
    /// The rest pose: no rotation, no offsets.
    pub fn rest() -> Self {
        Self::default()
    }

    /// Set the angle of `joint`.
    pub fn with_joint(mut self, joint: Joint, radians: f64) -> Self {
        self.joints.insert(joint.name().to_string(), radians);
        self
    }

    /// Set the whole-body offset.
    pub fn with_body_offset(mut self, dx: f64, dy: f64) -> Self {
        self.body_dx = dx;
        self.body_dy = dy;
        self
    }

    /// Set the extra head offset.
    pub fn with_head_dy(mut self, dy: f64) -> Self {
        self.head_dy = dy;
        self
    }

    /// Rotation for `joint`; `0.0` when absent or not finite.
    pub fn angle(&self, joint: Joint) -> f64 {
        self.joints
            .get(joint.name())
            .copied()
            .filter(|a| a.is_finite())
            .unwrap_or(0.0)
    }

    /// Keys that do not name a known joint. They are ignored when rendering.
    pub fn unknown_joints(&self) -> impl Iterator<Item = &str> + '_ {
        self.joints
            .keys()
            .map(String::as_str)
            .filter(|k| Joint::from_name(k).is_none())
    }

    /// Whole-body translation, with non-finite components treated as zero.
    pub(crate) fn body_offset(&self) -> (f64, f64) {
        (finite_or_zero(self.body_dx), finite_or_zero(self.body_dy))
    }

    pub(crate) fn head_offset(&self) -> f64 {
        finite_or_zero(self.head_dy)
    }

    /// Identity of the effective pose: two poses that render identically hash identically.
    pub(crate) fn fingerprint(&self) -> Fingerprint {
        let mut h = StableHasher::new();
        let (dx, dy) = self.body_offset();
        // `+ 0.0` folds -0.0 into 0.0
        h.write_f64(dx + 0.0);
        h.write_f64(dy + 0.0);
        h.write_f64(self.head_offset() + 0.0);
        for joint in Joint::ALL {
            h.write_f64(self.angle(joint) + 0.0);
        }
        h.finish()
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/pose.rs"]
mod tests;
