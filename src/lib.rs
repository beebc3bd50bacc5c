//! Jigsaw tile and story-mosaic synthesis.
//!
//! Each output tile is cut from a shared source photograph by a per-template mask, bevelled with
//! a bump map, outlined by a stroke map, optionally decorated with an overlay and blended with
//! its four orthogonal neighbours so piece edges bleed across tile seams. A second stage stitches
//! a 3x3 neighbourhood of finished tiles into a rotated portrait "story" image.
//!
//! # Pipeline overview
//!
//! 1. **Load**: a [`LayerProvider`] supplies every raster up front, substituting placeholders
//!    for missing assets (loading never fails).
//! 2. **Compose**: per pixel, tile-id decode, neighbour bleed, bump, cutout, stroke and overlay
//!    ([`render_tile`]); scanlines are split across a rayon pool.
//! 3. **Persist**: [`JigsawRenderer`] writes `post_N.png` / `raw_N.png`.
//! 4. **Story**: after all tiles of a batch are written, [`render_story`] assembles, rotates and
//!    crops `story_N.png`.
//!
//! Grid addressing is pure index arithmetic: `index ± 1` horizontally and `index ± row_count`
//! vertically (see [`TileIndex`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod batch;
mod config;
mod foundation;
mod render;

pub use assets::decode::{decode_layer, write_png};
pub use assets::layer::{LayerBuffer, LayerKind, Placeholder};
pub use assets::provider::{FsLayerProvider, LayerProvider, LayerSettings, MemoryLayerProvider};
pub use batch::{Batch, TileRequest};
pub use config::JigsawConfig;
pub use foundation::core::{ArtifactKind, GridGeometry, TileImage, TileIndex};
pub use foundation::error::{JigsawError, JigsawResult};
pub use render::bleed::{BleedLayers, MaskedSource, Side, base_color};
pub use render::pipeline::{ArtifactSelection, BatchReport, JigsawRenderer, RenderThreading};
pub use render::resample::{center_crop, rotate_expand};
pub use render::shade::{Rgbf, bump, overlay, stroke, to_rgb8};
pub use render::story::{
    Compass, StorySettings, StoryTiles, assemble_canvas, canvas_pixel, render_story,
};
pub use render::tile::{TileLayers, TileRenderOpts, compose_pixel, render_tile};
pub use render::tile_id::{MissingSet, decode_tile_id};
