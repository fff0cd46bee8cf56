use super::*;
use crate::atlas::builder::validate_clips;

#[test]
fn presets_are_a_valid_clip_list() {
    let clips = preset_clips();
    validate_clips(&clips).unwrap();
    let shape: Vec<(&str, usize, bool)> = clips
        .iter()
        .map(|c| (c.name.as_str(), c.poses.len(), c.looping))
        .collect();
    assert_eq!(
        shape,
        vec![("idle", 1, true), ("run", 8, true), ("jump", 3, false)]
    );
}

#[test]
fn run_cycle_mirrors_after_half_a_stride() {
    let run = run_cycle();
    let (a, b) = (&run[2], &run[6]);
    assert!((a.angle(Joint::LeftHip) + b.angle(Joint::LeftHip)).abs() < 1e-12);
    assert!((a.angle(Joint::LeftHip) - b.angle(Joint::RightHip)).abs() < 1e-12);
    assert!(a.angle(Joint::LeftHip) > 0.0);
}

#[test]
fn presets_only_name_known_joints() {
    for clip in preset_clips() {
        for pose in &clip.poses {
            assert_eq!(pose.unknown_joints().count(), 0, "{}", clip.name);
        }
    }
}
