use super::*;
use crate::{fixtures, rig::skeleton::Joint, segment::bands::SegmentBands};

fn model() -> CharacterModel {
    CharacterModel::from_raster(&fixtures::humanoid(), &SegmentBands::default()).unwrap()
}

fn cycle() -> Vec<Pose> {
    vec![
        Pose::rest(),
        Pose::rest().with_joint(Joint::LeftHip, 0.4),
        Pose::rest().with_joint(Joint::RightHip, 0.4),
        Pose::rest(),
    ]
}

#[test]
fn parallel_matches_sequential() {
    let model = model();
    let settings = RenderSettings::for_model(&model, 2.0);
    let poses = cycle();

    let seq = render_poses(&model, &poses, &settings, &RenderThreading::default()).unwrap();
    let par = render_poses(
        &model,
        &poses,
        &settings,
        &RenderThreading {
            parallel: true,
            threads: Some(2),
            static_frame_elision: false,
        },
    )
    .unwrap();
    assert_eq!(seq.len(), 4);
    assert_eq!(seq, par);
    assert_eq!(seq[0], seq[3]);
    assert_ne!(seq[1], seq[2]);
}

#[test]
fn repeated_poses_render_once() {
    let model = model();
    let settings = RenderSettings::for_model(&model, 1.0);
    let set = render_pose_set(&model, &cycle(), &settings, &RenderThreading::default()).unwrap();
    assert_eq!(set.unique.len(), 3);
    assert_eq!(set.frame_to_unique, vec![0, 1, 2, 0]);
    assert_eq!(
        set.stats,
        RenderStats {
            frames_total: 4,
            frames_rendered: 3,
            frames_elided: 1,
        }
    );
}

#[test]
fn elision_can_be_disabled() {
    let model = model();
    let settings = RenderSettings::for_model(&model, 1.0);
    let threading = RenderThreading {
        static_frame_elision: false,
        ..RenderThreading::default()
    };
    let set = render_pose_set(&model, &cycle(), &settings, &threading).unwrap();
    assert_eq!(set.unique.len(), 4);
    assert_eq!(set.stats.frames_elided, 0);
}

#[test]
fn zero_threads_is_rejected() {
    let model = model();
    let settings = RenderSettings::for_model(&model, 1.0);
    let threading = RenderThreading {
        parallel: true,
        threads: Some(0),
        ..RenderThreading::default()
    };
    assert!(matches!(
        render_poses(&model, &cycle(), &settings, &threading),
        Err(RigError::Validation(_))
    ));
}

#[test]
fn explicit_thread_count_sizes_the_pool() {
    let pool = build_thread_pool(Some(2)).unwrap();
    assert_eq!(pool.current_num_threads(), 2);
}

#[test]
fn no_poses_is_an_empty_result() {
    let model = model();
    let settings = RenderSettings::for_model(&model, 1.0);
    let frames = render_poses(&model, &[], &settings, &RenderThreading::default()).unwrap();
    assert!(frames.is_empty());
}
