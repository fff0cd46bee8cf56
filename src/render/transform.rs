//! Joint-frame transforms threaded by value.

use crate::foundation::core::{Affine, Point, Vec2};

/// Coordinate frame of one joint in a chain.
///
/// `world` maps the joint's rotated frame (origin at the pivot) to logical frame space.
/// Children are entered with [`JointFrame::enter`], which returns a new value; nothing is
/// saved or restored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointFrame {
    world: Affine,
    pivot: Point,
}

impl JointFrame {
    /// Chain root: the body transform, anchored at the source origin.
    pub fn root(body: Affine) -> Self {
        Self {
            world: body,
            pivot: Point::ORIGIN,
        }
    }

    /// Move to `pivot` (given in source coordinates) relative to the current pivot, inside the
    /// current rotated frame, then rotate by `angle` radians.
    ///
    /// Positive angles turn clockwise on screen (y points down).
    pub fn enter(self, pivot: Point, angle: f64) -> Self {
        let rel = pivot - self.pivot;
        Self {
            world: self.world * Affine::translate(rel) * Affine::rotate(angle),
            pivot,
        }
    }

    /// Transform for drawing a part given in source coordinates inside this frame.
    pub fn part_transform(self) -> Affine {
        self.world * Affine::translate(-self.pivot.to_vec2())
    }

    /// Current pivot in source coordinates.
    pub fn pivot(self) -> Point {
        self.pivot
    }

    /// Where the current pivot lands in logical frame space.
    pub fn pivot_position(self) -> Point {
        self.world * Point::ORIGIN
    }
}

/// Translation-only body transform.
pub(crate) fn body_transform(origin: Vec2, dx: f64, dy: f64) -> Affine {
    Affine::translate(origin + Vec2::new(dx, dy))
}

#[cfg(test)]
#[path = "../../tests/unit/render/transform.rs"]
mod tests;
