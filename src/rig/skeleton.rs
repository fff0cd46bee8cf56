use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::foundation::core::Point;

/// One rigid, independently rotatable region of a character.
///
/// `Left*`/`Right*` refer to the image-left and image-right sides.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum PartId {
    /// Everything above the head/shoulder line.
    Head,
    /// Central band between the shoulder and hip lines.
    Torso,
    /// Image-left arm.
    LeftArm,
    /// Image-right arm.
    RightArm,
    /// Image-left upper leg.
    LeftThigh,
    /// Image-left lower leg.
    LeftShin,
    /// Image-right upper leg.
    RightThigh,
    /// Image-right lower leg.
    RightShin,
}

impl PartId {
    /// Every part, in declaration order (matches [`PartId::index`]).
    pub const ALL: [PartId; 8] = [
        PartId::Head,
        PartId::Torso,
        PartId::LeftArm,
        PartId::RightArm,
        PartId::LeftThigh,
        PartId::LeftShin,
        PartId::RightThigh,
        PartId::RightShin,
    ];

    /// Back-to-front paint order: legs, torso, head, then arms over the torso.
    pub const DRAW_ORDER: [PartId; 8] = [
        PartId::LeftThigh,
        PartId::LeftShin,
        PartId::RightThigh,
        PartId::RightShin,
        PartId::Torso,
        PartId::Head,
        PartId::LeftArm,
        PartId::RightArm,
    ];

    /// Dense index in `0..8`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// camelCase name used in JSON.
    pub fn name(self) -> &'static str {
        match self {
            PartId::Head => "head",
            PartId::Torso => "torso",
            PartId::LeftArm => "leftArm",
            PartId::RightArm => "rightArm",
            PartId::LeftThigh => "leftThigh",
            PartId::LeftShin => "leftShin",
            PartId::RightThigh => "rightThigh",
            PartId::RightShin => "rightShin",
        }
    }
}

impl std::fmt::Display for PartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A named rotation point.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Joint {
    /// Head rotation point, on the head/shoulder line.
    Neck,
    /// Image-left shoulder.
    LeftShoulder,
    /// Image-right shoulder.
    RightShoulder,
    /// Image-left hip.
    LeftHip,
    /// Image-right hip.
    RightHip,
    /// Image-left knee, child of the left hip.
    LeftKnee,
    /// Image-right knee, child of the right hip.
    RightKnee,
}

impl Joint {
    /// Every joint, in declaration order.
    pub const ALL: [Joint; 7] = [
        Joint::Neck,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
    ];

    /// camelCase name used in pose files.
    pub fn name(self) -> &'static str {
        match self {
            Joint::Neck => "neck",
            Joint::LeftShoulder => "leftShoulder",
            Joint::RightShoulder => "rightShoulder",
            Joint::LeftHip => "leftHip",
            Joint::RightHip => "rightHip",
            Joint::LeftKnee => "leftKnee",
            Joint::RightKnee => "rightKnee",
        }
    }

    /// Inverse of [`Joint::name`]. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|j| j.name() == name)
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parent/child relation between joints and the joint that drives each part.
///
/// The relation is fixed at construction and acyclic: shoulder -> arm, neck -> head,
/// hip -> thigh, hip -> knee -> shin. The torso is driven by no joint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JointChain {
    parent: [Option<Joint>; 7],
    driver: [Option<Joint>; 8],
}

impl Default for JointChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl JointChain {
    /// The biped chain used by every character.
    pub fn standard() -> Self {
        let mut parent = [None; 7];
        parent[Joint::LeftKnee as usize] = Some(Joint::LeftHip);
        parent[Joint::RightKnee as usize] = Some(Joint::RightHip);

        let mut driver = [None; 8];
        driver[PartId::Head.index()] = Some(Joint::Neck);
        driver[PartId::LeftArm.index()] = Some(Joint::LeftShoulder);
        driver[PartId::RightArm.index()] = Some(Joint::RightShoulder);
        driver[PartId::LeftThigh.index()] = Some(Joint::LeftHip);
        driver[PartId::LeftShin.index()] = Some(Joint::LeftKnee);
        driver[PartId::RightThigh.index()] = Some(Joint::RightHip);
        driver[PartId::RightShin.index()] = Some(Joint::RightKnee);

        Self { parent, driver }
    }

    /// Parent joint, if any.
    pub fn parent(&self, joint: Joint) -> Option<Joint> {
        self.parent[joint as usize]
    }

    /// Innermost joint that rotates `part`.
    pub fn driver(&self, part: PartId) -> Option<Joint> {
        self.driver[part.index()]
    }

    /// Joints affecting `part`, root first. Rotations must be composed in this order.
    pub fn chain_for(&self, part: PartId) -> SmallVec<[Joint; 4]> {
        let mut chain = SmallVec::<[Joint; 4]>::new();
        let mut cur = self.driver(part);
        while let Some(j) = cur {
            if chain.len() == Joint::ALL.len() {
                break;
            }
            chain.push(j);
            cur = self.parent(j);
        }
        chain.reverse();
        chain
    }
}

/// Named pivot points in source-raster coordinates.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PivotTable {
    points: BTreeMap<Joint, Point>,
}

impl PivotTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the pivot for `joint`.
    pub fn insert(&mut self, joint: Joint, at: Point) {
        self.points.insert(joint, at);
    }

    /// Pivot for `joint`, if known.
    pub fn get(&self, joint: Joint) -> Option<Point> {
        self.points.get(&joint).copied()
    }

    /// Pivots in joint order.
    pub fn iter(&self) -> impl Iterator<Item = (Joint, Point)> + '_ {
        self.points.iter().map(|(j, p)| (*j, *p))
    }

    /// Number of pivots.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when no pivots are defined.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/skeleton.rs"]
mod tests;
