//! Rigsheet turns a single still of a pixel-art character into an animated sprite sheet.
//!
//! # Pipeline overview
//!
//! 1. **Palette**: `RasterImage -> Palette + ColorIndex` (exact colors, most frequent first)
//! 2. **Segment**: `RasterImage + SegmentBands -> PartMap` (every opaque pixel gets one body part)
//! 3. **Compress**: `PartMap -> PartCommands` (lossless solid-rectangle draw commands per part)
//! 4. **Render**: `CharacterModel + Pose -> Frame` (chained joint rotations, scale applied last)
//! 5. **Pack**: `CharacterModel + [ClipSpec] -> SpriteAtlas` (grid of frames plus clip metadata)
//!
//! Steps 1-3 run once per character and produce an immutable [`CharacterModel`]. Hand-authored
//! characters skip them and load a model from JSON via [`AuthoredCharacter`].
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every stage is pure and produces identical output for identical input,
//!   including parallel renders.
//! - **No IO in the engine**: only [`load_raster`], the config loaders, and the `save_*`
//!   helpers touch the filesystem.
//! - **Straight-alpha RGBA8** end to end.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod atlas;
mod compress;
mod config;
mod foundation;
mod palette;
mod presets;
mod render;
mod rig;
mod segment;

pub use assets::decode::{decode_raster, load_raster};
pub use assets::raster::RasterImage;
pub use assets::store::RigCache;
pub use atlas::builder::{AtlasLayout, ClipSpec, SpriteAtlas, build_atlas};
pub use atlas::metadata::{AnimationClip, AtlasMetadata, FrameRect};
pub use compress::rects::{
    CompressionStats, DrawCommand, PartCommands, compress_parts, replay_commands,
};
pub use config::CharacterConfig;
pub use foundation::core::{ALPHA_THRESHOLD, Affine, PixelRect, Point, Rect, Rgb, Vec2};
pub use foundation::error::{RigError, RigResult};
pub use foundation::math::Fingerprint;
pub use palette::{ColorCount, ColorIndex, Palette, color_histogram, extract_palette};
pub use presets::preset_clips;
pub use render::frame::Frame;
pub use render::kinematic::{RenderSettings, render_pose};
pub use render::pipeline::{RenderStats, RenderThreading, render_poses};
pub use render::transform::JointFrame;
pub use rig::authored::AuthoredCharacter;
pub use rig::model::CharacterModel;
pub use rig::pose::Pose;
pub use rig::skeleton::{Joint, JointChain, PartId, PivotTable};
pub use segment::bands::{BandLines, SegmentBands};
pub use segment::pivots::derive_pivots;
pub use segment::segmenter::{PartMap, classify, segment};

#[cfg(test)]
#[path = "../tests/unit/fixtures.rs"]
mod fixtures;
