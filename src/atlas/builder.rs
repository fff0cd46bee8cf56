use std::{
    collections::{BTreeMap, BTreeSet},
    path::Path,
};

use rayon::prelude::*;

use crate::{
    atlas::metadata::{AnimationClip, AtlasMetadata, FrameRect},
    foundation::error::{RigError, RigResult},
    render::{
        frame::{Frame, save_rgba8_png},
        kinematic::RenderSettings,
        pipeline::{RenderStats, RenderThreading, build_thread_pool, render_pose_set_in},
    },
    rig::{model::CharacterModel, pose::Pose},
};

/// One named animation: its poses, playback rate, and loop flag.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipSpec {
    /// Clip name, unique within one atlas.
    pub name: String,
    /// Poses in playback order.
    pub poses: Vec<Pose>,
    /// Playback rate in frames per second.
    pub rate: f64,
    /// Restart after the last frame.
    #[serde(rename = "loop", default)]
    pub looping: bool,
}

impl ClipSpec {
    /// Construct a clip.
    pub fn new(name: impl Into<String>, rate: f64, looping: bool, poses: Vec<Pose>) -> Self {
        Self {
            name: name.into(),
            poses,
            rate,
            looping,
        }
    }
}

/// Check clip names, pose counts, and rates.
pub(crate) fn validate_clips(clips: &[ClipSpec]) -> RigResult<()> {
    if clips.is_empty() {
        return Err(RigError::validation("atlas needs at least one clip"));
    }
    let mut names = BTreeSet::new();
    for clip in clips {
        if clip.name.is_empty() {
            return Err(RigError::validation("clip name must be non-empty"));
        }
        if !names.insert(clip.name.as_str()) {
            return Err(RigError::validation(format!(
                "duplicate clip name '{}'",
                clip.name
            )));
        }
        if clip.poses.is_empty() {
            return Err(RigError::validation(format!(
                "clip '{}' has no poses",
                clip.name
            )));
        }
        if !clip.rate.is_finite() || clip.rate <= 0.0 {
            return Err(RigError::validation(format!(
                "clip '{}' rate must be finite and > 0, got {}",
                clip.name, clip.rate
            )));
        }
    }
    Ok(())
}

/// Grid shape of the atlas.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasLayout {
    /// Cells per row.
    #[serde(default = "default_columns")]
    pub columns: u32,
    /// Fixed row count; grown to fit when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

fn default_columns() -> u32 {
    2
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: None,
        }
    }
}

impl AtlasLayout {
    /// Reject empty grids.
    pub fn validate(&self) -> RigResult<()> {
        if self.columns == 0 {
            return Err(RigError::validation("atlas columns must be >= 1"));
        }
        if self.rows == Some(0) {
            return Err(RigError::validation("atlas rows must be >= 1 when set"));
        }
        Ok(())
    }

    /// `(columns, rows)` for `frames` cells. A fixed grid that is too small is a
    /// [`RigError::Capacity`] error; frames are never dropped.
    pub fn grid_for(&self, frames: u32) -> RigResult<(u32, u32)> {
        self.validate()?;
        match self.rows {
            Some(rows) => {
                let capacity = u64::from(rows) * u64::from(self.columns);
                if u64::from(frames) > capacity {
                    return Err(RigError::capacity(format!(
                        "{frames} frames do not fit a {}x{rows} grid ({capacity} cells)",
                        self.columns
                    )));
                }
                Ok((self.columns, rows))
            }
            None => {
                let columns = self.columns.min(frames.max(1));
                Ok((columns, frames.div_ceil(columns).max(1)))
            }
        }
    }
}

/// Every rendered frame packed into one raster, plus addressing and clip tables.
///
/// Immutable once built.
#[derive(Clone, Debug)]
pub struct SpriteAtlas {
    width: u32,
    height: u32,
    frame_width: u32,
    frame_height: u32,
    columns: u32,
    rows: u32,
    data: Vec<u8>,
    frames: Vec<FrameRect>,
    clips: BTreeMap<String, AnimationClip>,
    stats: RenderStats,
}

impl SpriteAtlas {
    /// Atlas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Atlas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell width in pixels.
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    /// Cell height in pixels.
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    /// Grid columns.
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Grid rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// All frame rectangles, by index.
    pub fn frames(&self) -> &[FrameRect] {
        &self.frames
    }

    /// Rectangle of frame `index`.
    pub fn frame_rect(&self, index: usize) -> Option<FrameRect> {
        self.frames.get(index).copied()
    }

    /// Clip by name.
    pub fn clip(&self, name: &str) -> Option<&AnimationClip> {
        self.clips.get(name)
    }

    /// All clips by name.
    pub fn clips(&self) -> &BTreeMap<String, AnimationClip> {
        &self.clips
    }

    /// Rendering counters from the build.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Copy frame `index` out of the atlas.
    pub fn frame(&self, index: usize) -> Option<Frame> {
        let rect = self.frame_rect(index)?;
        let mut out = Frame::transparent(rect.width, rect.height);
        let row = rect.width as usize * 4;
        for y in 0..rect.height as usize {
            let src = ((rect.y as usize + y) * self.width as usize + rect.x as usize) * 4;
            out.data[y * row..(y + 1) * row].copy_from_slice(&self.data[src..src + row]);
        }
        Some(out)
    }

    /// Playback metadata.
    pub fn metadata(&self) -> AtlasMetadata {
        AtlasMetadata {
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            columns: self.columns,
            rows: self.rows,
            frames: self.frames.clone(),
            clips: self.clips.clone(),
        }
    }

    /// Encode the atlas raster as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> RigResult<()> {
        save_rgba8_png(path.as_ref(), &self.data, self.width, self.height)
    }
}

/// Render every pose of every clip and pack the frames into one atlas.
///
/// Poses are flattened in clip order into global frame indices, laid out row-major across the
/// grid. Each clip records its contiguous index range. With `threading.parallel`, frames are
/// rendered and cell rows are blitted on a shared worker pool.
#[tracing::instrument(skip_all, fields(clips = clips.len(), columns = layout.columns))]
pub fn build_atlas(
    model: &CharacterModel,
    clips: &[ClipSpec],
    layout: &AtlasLayout,
    settings: &RenderSettings,
    threading: &RenderThreading,
) -> RigResult<SpriteAtlas> {
    validate_clips(clips)?;
    settings.validate()?;
    threading.validate()?;

    let poses: Vec<Pose> = clips.iter().flat_map(|c| c.poses.iter().cloned()).collect();
    let frame_count = u32::try_from(poses.len()).map_err(|_| {
        RigError::capacity(format!(
            "{} frames exceed the atlas index range",
            poses.len()
        ))
    })?;
    let (columns, rows) = layout.grid_for(frame_count)?;

    let (fw, fh) = (settings.frame_width, settings.frame_height);
    let width = columns
        .checked_mul(fw)
        .ok_or_else(|| RigError::capacity("atlas width overflows u32"))?;
    let height = rows
        .checked_mul(fh)
        .ok_or_else(|| RigError::capacity("atlas height overflows u32"))?;
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| RigError::capacity("atlas buffer size overflows"))?;

    let pool = if threading.parallel {
        Some(build_thread_pool(threading.threads)?)
    } else {
        None
    };
    let rendered = render_pose_set_in(
        model,
        &poses,
        settings,
        threading.static_frame_elision,
        pool.as_ref(),
    )?;

    let mut data = vec![0u8; len];
    let band = width as usize * fh as usize * 4;
    let cell = CellSource {
        columns,
        frame_width: fw,
        frame_height: fh,
        unique: &rendered.unique,
        frame_to_unique: &rendered.frame_to_unique,
    };
    match pool.as_ref() {
        Some(pool) => pool.install(|| {
            data.par_chunks_mut(band)
                .enumerate()
                .for_each(|(row, dst)| cell.blit_row(row as u32, dst));
        }),
        None => data
            .chunks_mut(band)
            .enumerate()
            .for_each(|(row, dst)| cell.blit_row(row as u32, dst)),
    }

    let frames = (0..frame_count)
        .map(|index| FrameRect {
            index,
            x: (index % columns) * fw,
            y: (index / columns) * fh,
            width: fw,
            height: fh,
        })
        .collect();

    let mut clip_table = BTreeMap::new();
    let mut next = 0u32;
    for clip in clips {
        let count = clip.poses.len() as u32;
        clip_table.insert(
            clip.name.clone(),
            AnimationClip {
                frame_indices: (next..next + count).collect(),
                rate: clip.rate,
                looping: clip.looping,
            },
        );
        next += count;
    }

    tracing::debug!(
        width,
        height,
        frames = frame_count,
        rendered = rendered.stats.frames_rendered,
        "built sprite atlas"
    );
    Ok(SpriteAtlas {
        width,
        height,
        frame_width: fw,
        frame_height: fh,
        columns,
        rows,
        data,
        frames,
        clips: clip_table,
        stats: rendered.stats,
    })
}

struct CellSource<'a> {
    columns: u32,
    frame_width: u32,
    frame_height: u32,
    unique: &'a [Frame],
    frame_to_unique: &'a [usize],
}

impl CellSource<'_> {
    /// Copy the frames of grid row `row` into `dst`, one band of `frame_height` atlas rows.
    fn blit_row(&self, row: u32, dst: &mut [u8]) {
        let atlas_row = self.columns as usize * self.frame_width as usize * 4;
        let cell_row = self.frame_width as usize * 4;
        for col in 0..self.columns {
            let index = (row * self.columns + col) as usize;
            let Some(&unique) = self.frame_to_unique.get(index) else {
                break;
            };
            let frame = &self.unique[unique];
            for y in 0..self.frame_height as usize {
                let src = &frame.data[y * cell_row..(y + 1) * cell_row];
                let at = y * atlas_row + col as usize * cell_row;
                dst[at..at + cell_row].copy_from_slice(src);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/builder.rs"]
mod tests;
