use std::path::Path;

use anyhow::Context;

use crate::{
    atlas::builder::{AtlasLayout, ClipSpec, validate_clips},
    foundation::{
        core::Vec2,
        error::{RigError, RigResult},
    },
    presets::preset_clips,
    render::{kinematic::RenderSettings, pipeline::RenderThreading},
    rig::model::CharacterModel,
    segment::bands::SegmentBands,
};

/// Per-character pipeline configuration, loaded from JSON.
///
/// Every field is optional:
///
/// ```json
/// {
///   "bands": { "headLine": 0.3 },
///   "scale": 2,
///   "padding": 6,
///   "layout": { "columns": 4 },
///   "threading": { "parallel": true },
///   "clips": [
///     { "name": "wave", "rate": 6, "loop": true, "poses": [{}, { "rightShoulder": -1.2 }] }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterConfig {
    /// Segmentation band fractions for raster sources.
    pub bands: SegmentBands,
    /// Output scale used when `render` is not given.
    pub scale: f64,
    /// Transparent logical margin around the source used when `render` is not given, so
    /// swinging limbs stay inside the frame.
    pub padding: u32,
    /// Explicit frame geometry; overrides `scale` and `padding`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderSettings>,
    /// Atlas grid.
    pub layout: AtlasLayout,
    /// Multi-frame rendering controls.
    pub threading: RenderThreading,
    /// Clips to render; the stock presets when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clips: Vec<ClipSpec>,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            bands: SegmentBands::default(),
            scale: 1.0,
            padding: 0,
            render: None,
            layout: AtlasLayout::default(),
            threading: RenderThreading::default(),
            clips: Vec::new(),
        }
    }
}

impl CharacterConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> RigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> RigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read character config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Check every section.
    pub fn validate(&self) -> RigResult<()> {
        self.bands.validate()?;
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RigError::validation(format!(
                "config scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if let Some(render) = &self.render {
            render.validate()?;
        }
        self.layout.validate()?;
        self.threading.validate()?;
        if !self.clips.is_empty() {
            validate_clips(&self.clips)?;
        }
        Ok(())
    }

    /// Frame geometry for `model`.
    pub fn render_settings(&self, model: &CharacterModel) -> RenderSettings {
        if let Some(render) = &self.render {
            return render.clone();
        }
        let pad = self.padding.saturating_mul(2);
        RenderSettings {
            origin: Vec2::new(f64::from(self.padding), f64::from(self.padding)),
            ..RenderSettings::fit(
                model.width().saturating_add(pad),
                model.height().saturating_add(pad),
                self.scale,
            )
        }
    }

    /// Configured clips, or the presets when none are configured.
    pub fn clips(&self) -> Vec<ClipSpec> {
        if self.clips.is_empty() {
            preset_clips()
        } else {
            self.clips.clone()
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
