use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::raster::RasterImage,
    atlas::builder::SpriteAtlas,
    foundation::{error::RigResult, math::Fingerprint},
    rig::model::{CharacterModel, raster_model_key},
    segment::bands::SegmentBands,
};

/// Build-once store for derived characters and their atlases.
///
/// Models are keyed by the fingerprint of their source raster and band configuration, atlases
/// by a caller-chosen character identity. A repeated request returns the stored `Arc` without
/// rebuilding.
#[derive(Debug, Default)]
pub struct RigCache {
    models: HashMap<Fingerprint, Arc<CharacterModel>>,
    atlases: HashMap<String, Arc<SpriteAtlas>>,
}

impl RigCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Model for `raster` under `bands`, segmenting and compressing on first use.
    pub fn model_for_raster(
        &mut self,
        raster: &RasterImage,
        bands: &SegmentBands,
    ) -> RigResult<Arc<CharacterModel>> {
        let key = raster_model_key(raster, bands);
        if let Some(model) = self.models.get(&key) {
            tracing::debug!(%key, "model cache hit");
            return Ok(Arc::clone(model));
        }
        let model = Arc::new(CharacterModel::from_raster(raster, bands)?);
        self.models.insert(key, Arc::clone(&model));
        Ok(model)
    }

    /// Atlas for character `id`, calling `build` only when none is stored yet.
    ///
    /// A failed build stores nothing.
    pub fn atlas_for<F>(&mut self, id: &str, build: F) -> RigResult<Arc<SpriteAtlas>>
    where
        F: FnOnce() -> RigResult<SpriteAtlas>,
    {
        if let Some(atlas) = self.atlases.get(id) {
            tracing::debug!(id, "atlas cache hit");
            return Ok(Arc::clone(atlas));
        }
        let atlas = Arc::new(build()?);
        self.atlases.insert(id.to_owned(), Arc::clone(&atlas));
        Ok(atlas)
    }

    /// Stored atlas for `id`, if any.
    pub fn atlas(&self, id: &str) -> Option<Arc<SpriteAtlas>> {
        self.atlases.get(id).cloned()
    }

    /// Drop the stored atlas for `id` so the next request rebuilds it.
    pub fn invalidate_atlas(&mut self, id: &str) -> bool {
        self.atlases.remove(id).is_some()
    }

    /// Number of cached models.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Number of cached atlases.
    pub fn atlas_count(&self) -> usize {
        self.atlases.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
