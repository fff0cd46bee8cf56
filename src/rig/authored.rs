use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{
    compress::rects::{DrawCommand, PartCommands},
    foundation::{
        core::Rgb,
        error::{RigError, RigResult},
    },
    palette::Palette,
    rig::{
        model::CharacterModel,
        skeleton::{PartId, PivotTable},
    },
};

/// A character whose parts were drawn by hand instead of segmented from a raster.
///
/// ```json
/// {
///   "width": 16, "height": 32,
///   "palette": ["#2a2a2a", "#f0c8a0"],
///   "parts": { "torso": [[0, 5, 9, 6, 10]], "head": [[1, 5, 0, 6, 9]] },
///   "pivots": { "neck": { "x": 8, "y": 9 } }
/// }
/// ```
///
/// Commands are `[color, x, y, width, height]` and are painted in the listed order, so they
/// may overlap.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthoredCharacter {
    /// Logical canvas width.
    pub width: u32,
    /// Logical canvas height.
    pub height: u32,
    /// `#rrggbb` colors; command color indices point into this list.
    pub palette: Vec<String>,
    /// Draw commands per part. Missing parts are empty.
    #[serde(default)]
    pub parts: BTreeMap<PartId, Vec<DrawCommand>>,
    /// Joint pivots in canvas coordinates.
    #[serde(default)]
    pub pivots: PivotTable,
}

impl AuthoredCharacter {
    /// Parse from JSON text.
    pub fn from_json_str(json: &str) -> RigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> RigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read authored character '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Validate and convert into a render-ready model.
    pub fn into_model(self) -> RigResult<CharacterModel> {
        let colors = self
            .palette
            .iter()
            .map(|s| Rgb::from_hex(s))
            .collect::<RigResult<Vec<_>>>()?;
        if colors.is_empty() && self.parts.values().any(|c| !c.is_empty()) {
            return Err(RigError::validation(
                "authored character has commands but an empty palette",
            ));
        }
        let palette = Palette::from_colors(colors)?;

        let mut parts = PartCommands::default();
        for (part, commands) in self.parts {
            parts.set(part, commands);
        }
        CharacterModel::from_parts(self.width, self.height, palette, parts, self.pivots)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/authored.rs"]
mod tests;
