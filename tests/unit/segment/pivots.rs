use super::*;

#[test]
fn empty_bounds_yield_no_pivots() {
    assert!(derive_pivots(None, &SegmentBands::default()).is_empty());
}

#[test]
fn pivots_sit_on_band_lines() {
    let bands = SegmentBands {
        head_line: 0.25,
        hip_line: 0.5,
        knee_line: 0.75,
        center: 0.5,
        arm_margin: 0.25,
        shoulder_spread: 0.25,
        hip_spread: 0.125,
    };
    let pivots = derive_pivots(Some(PixelRect::new(0, 0, 16, 32)), &bands);
    assert_eq!(pivots.len(), Joint::ALL.len());
    assert_eq!(pivots.get(Joint::Neck), Some(Point::new(8.0, 8.0)));
    assert_eq!(pivots.get(Joint::LeftShoulder), Some(Point::new(4.0, 8.0)));
    assert_eq!(pivots.get(Joint::RightShoulder), Some(Point::new(12.0, 8.0)));
    assert_eq!(pivots.get(Joint::LeftHip), Some(Point::new(6.0, 16.0)));
    assert_eq!(pivots.get(Joint::RightHip), Some(Point::new(10.0, 16.0)));
    assert_eq!(pivots.get(Joint::LeftKnee), Some(Point::new(6.0, 24.0)));
    assert_eq!(pivots.get(Joint::RightKnee), Some(Point::new(10.0, 24.0)));
}

#[test]
fn knees_hang_directly_below_hips() {
    let pivots = derive_pivots(
        Some(PixelRect::new(3, 7, 21, 45)),
        &SegmentBands::default(),
    );
    let lh = pivots.get(Joint::LeftHip).unwrap();
    let lk = pivots.get(Joint::LeftKnee).unwrap();
    assert_eq!(lh.x, lk.x);
    assert!(lk.y > lh.y);
}
