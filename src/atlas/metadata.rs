use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::foundation::error::RigResult;

/// Pixel rectangle of one frame cell inside the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRect {
    /// Global frame index.
    pub index: u32,
    /// Left edge in atlas pixels.
    pub x: u32,
    /// Top edge in atlas pixels.
    pub y: u32,
    /// Cell width.
    pub width: u32,
    /// Cell height.
    pub height: u32,
}

impl FrameRect {
    /// `true` when the two cells share at least one pixel.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Playback description of a named run of atlas frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationClip {
    /// Global frame indices, in playback order.
    pub frame_indices: Vec<u32>,
    /// Playback rate in frames per second.
    pub rate: f64,
    /// Restart from the first frame after the last.
    #[serde(rename = "loop")]
    pub looping: bool,
}

/// Everything a playback component needs to slice the atlas.
///
/// ```json
/// {
///   "frameWidth": 16, "frameHeight": 32, "columns": 2, "rows": 1,
///   "frames": [{ "index": 0, "x": 0, "y": 0, "width": 16, "height": 32 }, ...],
///   "clips": { "idle": { "frameIndices": [0], "rate": 1.0, "loop": true } }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtlasMetadata {
    /// Cell width in pixels.
    pub frame_width: u32,
    /// Cell height in pixels.
    pub frame_height: u32,
    /// Grid columns.
    pub columns: u32,
    /// Grid rows.
    pub rows: u32,
    /// One entry per frame, ordered by index.
    pub frames: Vec<FrameRect>,
    /// Clips by name.
    pub clips: BTreeMap<String, AnimationClip>,
}

impl AtlasMetadata {
    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> RigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse metadata previously written by [`AtlasMetadata::to_json_pretty`].
    pub fn from_json_str(json: &str) -> RigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write pretty JSON to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> RigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let json = self.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("write atlas metadata '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/atlas/metadata.rs"]
mod tests;
