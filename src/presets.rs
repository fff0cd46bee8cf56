//! Stock animation clips for a side-on humanoid.

use std::f64::consts::TAU;

use crate::{atlas::builder::ClipSpec, rig::pose::Pose, rig::skeleton::Joint};

const RUN_FRAMES: u32 = 8;
const RUN_HIP_SWING: f64 = 0.55;
const RUN_KNEE_BEND: f64 = 0.7;
const RUN_ARM_SWING: f64 = 0.6;

/// `idle` (1 pose, looping), `run` (8 poses, looping) and `jump` (3 poses, played once).
pub fn preset_clips() -> Vec<ClipSpec> {
    vec![
        ClipSpec::new("idle", 2.0, true, vec![Pose::rest()]),
        ClipSpec::new("run", 12.0, true, run_cycle()),
        ClipSpec::new("jump", 8.0, false, jump()),
    ]
}

/// One stride: legs swing in opposition, the trailing knee folds, arms counter-swing, and the
/// body lifts at mid-stride.
fn run_cycle() -> Vec<Pose> {
    (0..RUN_FRAMES)
        .map(|i| {
            let phase = TAU * f64::from(i) / f64::from(RUN_FRAMES);
            let swing = phase.sin();
            // a knee only folds while its thigh swings back
            let left_knee = RUN_KNEE_BEND * (-swing).max(0.0);
            let right_knee = RUN_KNEE_BEND * swing.max(0.0);
            let lift = if i % 4 == 1 || i % 4 == 2 { -1.0 } else { 0.0 };
            Pose::rest()
                .with_joint(Joint::LeftHip, RUN_HIP_SWING * swing)
                .with_joint(Joint::RightHip, -RUN_HIP_SWING * swing)
                .with_joint(Joint::LeftKnee, -left_knee)
                .with_joint(Joint::RightKnee, -right_knee)
                .with_joint(Joint::LeftShoulder, -RUN_ARM_SWING * swing)
                .with_joint(Joint::RightShoulder, RUN_ARM_SWING * swing)
                .with_body_offset(0.0, lift)
        })
        .collect()
}

fn jump() -> Vec<Pose> {
    let crouch = Pose::rest()
        .with_joint(Joint::LeftHip, 0.4)
        .with_joint(Joint::RightHip, -0.4)
        .with_joint(Joint::LeftKnee, -0.8)
        .with_joint(Joint::RightKnee, 0.8)
        .with_body_offset(0.0, 2.0)
        .with_head_dy(1.0);
    let airborne = Pose::rest()
        .with_joint(Joint::LeftShoulder, 2.4)
        .with_joint(Joint::RightShoulder, -2.4)
        .with_joint(Joint::LeftKnee, -0.5)
        .with_joint(Joint::RightKnee, 0.5)
        .with_body_offset(0.0, -4.0);
    let land = Pose::rest()
        .with_joint(Joint::LeftHip, 0.2)
        .with_joint(Joint::RightHip, -0.2)
        .with_joint(Joint::LeftKnee, -0.3)
        .with_joint(Joint::RightKnee, 0.3)
        .with_body_offset(0.0, 1.0);
    vec![crouch, airborne, land]
}

#[cfg(test)]
#[path = "../tests/unit/presets.rs"]
mod tests;
