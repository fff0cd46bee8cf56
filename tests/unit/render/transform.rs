use std::f64::consts::FRAC_PI_2;

use super::*;

fn close(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn zero_rotation_is_a_pure_translation() {
    let root = JointFrame::root(Affine::translate(Vec2::new(3.0, -1.0)));
    let hip = root.enter(Point::new(6.0, 19.0), 0.0);
    let knee = hip.enter(Point::new(6.0, 25.0), 0.0);
    assert_eq!(
        knee.part_transform(),
        Affine::translate(Vec2::new(3.0, -1.0))
    );
}

#[test]
fn pivot_stays_fixed_under_its_own_rotation() {
    let hip_at = Point::new(6.0, 19.0);
    let hip = JointFrame::root(Affine::IDENTITY).enter(hip_at, 1.1);
    assert!(close(hip.part_transform() * hip_at, hip_at));
    assert!(close(hip.pivot_position(), hip_at));
}

#[test]
fn knee_follows_hip_rotation() {
    let hip_at = Point::new(0.0, 0.0);
    let knee_at = Point::new(0.0, 10.0);
    let hip = JointFrame::root(Affine::IDENTITY).enter(hip_at, FRAC_PI_2);
    let knee = hip.enter(knee_at, 0.0);
    // a quarter turn clockwise swings the knee from below the hip to its left
    assert!(close(knee.pivot_position(), Point::new(-10.0, 0.0)));
    assert_eq!(knee.pivot(), knee_at);
}

#[test]
fn chained_rotation_matches_explicit_matrix() {
    let hip_at = Point::new(6.0, 19.0);
    let knee_at = Point::new(6.0, 25.0);
    let (h, k) = (0.4, -0.7);
    let knee = JointFrame::root(Affine::IDENTITY)
        .enter(hip_at, h)
        .enter(knee_at, k);

    let expected = Affine::translate(hip_at.to_vec2())
        * Affine::rotate(h)
        * Affine::translate(knee_at - hip_at)
        * Affine::rotate(k)
        * Affine::translate(-knee_at.to_vec2());
    let p = Point::new(7.0, 30.0);
    assert!(close(knee.part_transform() * p, expected * p));
}

#[test]
fn body_transform_adds_offsets_to_origin() {
    let t = body_transform(Vec2::new(1.0, 2.0), 0.5, -4.0);
    assert_eq!(t * Point::ORIGIN, Point::new(1.5, -2.0));
}
