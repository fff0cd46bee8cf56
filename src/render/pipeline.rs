use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    foundation::{
        error::{RigError, RigResult},
        math::Fingerprint,
    },
    render::{
        frame::Frame,
        kinematic::{RenderSettings, render_pose},
    },
    rig::{model::CharacterModel, pose::Pose},
};

/// Render every pose of `poses` in order.
pub fn render_poses(
    model: &CharacterModel,
    poses: &[Pose],
    settings: &RenderSettings,
    threading: &RenderThreading,
) -> RigResult<Vec<Frame>> {
    let set = render_pose_set(model, poses, settings, threading)?;
    Ok(set
        .frame_to_unique
        .iter()
        .map(|&u| set.unique[u].clone())
        .collect())
}

/// Threading controls for multi-pose rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderThreading {
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Render repeated poses once and reuse the frame.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            static_frame_elision: true,
        }
    }
}

impl RenderThreading {
    /// Reject an explicit zero thread count.
    pub fn validate(&self) -> RigResult<()> {
        if self.threads == Some(0) {
            return Err(RigError::validation(
                "render threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Aggregated rendering counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderStats {
    /// Poses requested.
    pub frames_total: u64,
    /// Poses actually rasterized.
    pub frames_rendered: u64,
    /// Poses served from an identical earlier pose.
    pub frames_elided: u64,
}

/// Distinct rendered frames plus the mapping from pose order to them.
pub(crate) struct RenderedSet {
    pub(crate) unique: Vec<Frame>,
    pub(crate) frame_to_unique: Vec<usize>,
    pub(crate) stats: RenderStats,
}

pub(crate) fn render_pose_set(
    model: &CharacterModel,
    poses: &[Pose],
    settings: &RenderSettings,
    threading: &RenderThreading,
) -> RigResult<RenderedSet> {
    threading.validate()?;
    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };
    render_pose_set_in(
        model,
        poses,
        settings,
        threading.static_frame_elision,
        pool.as_ref(),
    )
}

/// Render on `pool` when given, otherwise on the calling thread.
#[tracing::instrument(skip_all, fields(poses = poses.len(), parallel = pool.is_some()))]
pub(crate) fn render_pose_set_in(
    model: &CharacterModel,
    poses: &[Pose],
    settings: &RenderSettings,
    static_frame_elision: bool,
    pool: Option<&rayon::ThreadPool>,
) -> RigResult<RenderedSet> {
    settings.validate()?;

    let mut frame_to_unique = Vec::with_capacity(poses.len());
    let mut unique_indices = Vec::<usize>::new();
    if static_frame_elision {
        let mut seen = HashMap::<Fingerprint, usize>::new();
        for (idx, pose) in poses.iter().enumerate() {
            let slot = *seen.entry(pose.fingerprint()).or_insert_with(|| {
                unique_indices.push(idx);
                unique_indices.len() - 1
            });
            frame_to_unique.push(slot);
        }
    } else {
        for idx in 0..poses.len() {
            frame_to_unique.push(idx);
            unique_indices.push(idx);
        }
    }

    let rendered = match pool {
        Some(pool) if unique_indices.len() > 1 => pool.install(|| {
            unique_indices
                .par_iter()
                .map(|&idx| render_pose(model, &poses[idx], settings))
                .collect::<Vec<_>>()
        }),
        _ => unique_indices
            .iter()
            .map(|&idx| render_pose(model, &poses[idx], settings))
            .collect::<Vec<_>>(),
    };
    let unique = rendered.into_iter().collect::<RigResult<Vec<_>>>()?;

    let stats = RenderStats {
        frames_total: poses.len() as u64,
        frames_rendered: unique.len() as u64,
        frames_elided: (poses.len() - unique.len()) as u64,
    };
    tracing::debug!(
        total = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "rendered pose set"
    );
    Ok(RenderedSet {
        unique,
        frame_to_unique,
        stats,
    })
}

/// Build the worker pool. `threads` must already be validated.
pub(crate) fn build_thread_pool(threads: Option<usize>) -> RigResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
