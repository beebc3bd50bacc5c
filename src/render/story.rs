//! Story mosaic: a 3x3 neighbourhood of rendered tiles, rotated and cropped to portrait.

use crate::assets::layer::{LayerBuffer, LayerKind};
use crate::assets::provider::LayerProvider;
use crate::foundation::core::{TileImage, TileIndex};
use crate::foundation::error::{JigsawError, JigsawResult};
use crate::render::fill_rows;
use crate::render::resample::{center_crop, rotate_expand};

/// Story canvas, output frame and rotation parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorySettings {
    /// Width of the assembled canvas before rotation.
    pub canvas_width: u32,
    /// Height of the assembled canvas before rotation.
    pub canvas_height: u32,
    /// Width of the final story image.
    pub width: u32,
    /// Height of the final story image.
    pub height: u32,
    /// Per-index angle increment (golden angle).
    pub angle_step_deg: f64,
    /// Angles wrap into `[0, modulus)` before the offset is applied.
    pub angle_modulus_deg: f64,
    /// Subtracted after wrapping.
    pub angle_offset_deg: f64,
}

impl Default for StorySettings {
    fn default() -> Self {
        Self {
            canvas_width: 2048,
            canvas_height: 2560,
            width: 1080,
            height: 1920,
            angle_step_deg: 137.50309,
            angle_modulus_deg: 42.0,
            angle_offset_deg: 23.0,
        }
    }
}

impl StorySettings {
    /// Rotation for `index`: `(index * step) mod modulus - offset`, in degrees.
    pub fn angle_deg(&self, index: TileIndex) -> f64 {
        (index.0 as f64 * self.angle_step_deg).rem_euclid(self.angle_modulus_deg)
            - self.angle_offset_deg
    }

    fn validate(&self) -> JigsawResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(JigsawError::validation("story canvas must be non-empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(JigsawError::validation("story frame must be non-empty"));
        }
        if !(self.angle_step_deg.is_finite()
            && self.angle_offset_deg.is_finite()
            && self.angle_modulus_deg.is_finite()
            && self.angle_modulus_deg > 0.0)
        {
            return Err(JigsawError::validation(
                "story angle parameters must be finite with modulus > 0",
            ));
        }
        Ok(())
    }
}

/// Position of a tile in the 3x3 story neighbourhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compass {
    /// Up-left.
    NorthWest,
    /// Up.
    North,
    /// Up-right.
    NorthEast,
    /// Left.
    West,
    /// The story's own tile.
    Center,
    /// Right.
    East,
    /// Down-left.
    SouthWest,
    /// Down.
    South,
    /// Down-right.
    SouthEast,
}

impl Compass {
    /// Row-major order, top-left first.
    pub const ALL: [Compass; 9] = [
        Compass::NorthWest,
        Compass::North,
        Compass::NorthEast,
        Compass::West,
        Compass::Center,
        Compass::East,
        Compass::SouthWest,
        Compass::South,
        Compass::SouthEast,
    ];

    /// Screen-space `(column, row)` in `-1..=1`.
    pub fn grid_offset(self) -> (i64, i64) {
        let i = self as i64;
        (i % 3 - 1, i / 3 - 1)
    }

    fn from_grid_offset(col: i64, row: i64) -> Self {
        Self::ALL[((row + 1) * 3 + (col + 1)) as usize]
    }

    /// Tile index at this position. Screen-left is `index + 1`, screen-up `index + row_count`.
    pub fn tile_index(self, center: TileIndex, row_count: u32) -> TileIndex {
        let (col, row) = self.grid_offset();
        center.offset(-col, -row, row_count)
    }
}

/// The nine rendered tiles around a story index.
#[derive(Clone, Debug)]
pub struct StoryTiles {
    /// Story index (the centre tile).
    pub index: TileIndex,
    /// Tiles in [`Compass::ALL`] order.
    pub tiles: [LayerBuffer; 9],
}

impl StoryTiles {
    /// Load the rendered `post` tiles around `index`.
    pub fn load(provider: &dyn LayerProvider, index: TileIndex, row_count: u32) -> Self {
        let tiles = Compass::ALL
            .map(|pos| provider.load(LayerKind::RenderedPost, pos.tile_index(index, row_count)));
        Self { index, tiles }
    }

    /// Tile at `pos`.
    pub fn get(&self, pos: Compass) -> &LayerBuffer {
        &self.tiles[pos as usize]
    }
}

fn axis_region(rel: i64, center_len: i64) -> i64 {
    if rel < 0 {
        -1
    } else if rel < center_len {
        0
    } else {
        1
    }
}

fn wrap_local(rel: i64, region: i64, own_len: i64, center_len: i64) -> i64 {
    match region {
        -1 => rel + own_len,
        0 => rel,
        _ => rel - center_len,
    }
}

/// Colour of canvas pixel `(x, y)` for a canvas whose centre tile starts at `origin`.
#[inline]
pub fn canvas_pixel(tiles: &StoryTiles, origin: (i64, i64), x: i64, y: i64) -> [u8; 3] {
    let center = tiles.get(Compass::Center);
    let (cw, ch) = (i64::from(center.width()), i64::from(center.height()));
    let (rx, ry) = (x - origin.0, y - origin.1);

    let col = axis_region(rx, cw);
    let row = axis_region(ry, ch);
    let tile = tiles.get(Compass::from_grid_offset(col, row));

    let lx = wrap_local(rx, col, i64::from(tile.width()), cw);
    let ly = wrap_local(ry, row, i64::from(tile.height()), ch);
    match tile.get(lx, ly) {
        Some(px) => [px[0], px[1], px[2]],
        None => [0, 0, 0],
    }
}

/// Stitch the nine tiles into a `canvas_width x canvas_height` image centred on the centre tile.
pub fn assemble_canvas(tiles: &StoryTiles, settings: &StorySettings, parallel: bool) -> TileImage {
    let center = tiles.get(Compass::Center);
    let (w, h) = (settings.canvas_width, settings.canvas_height);
    let origin = (
        (i64::from(w) - i64::from(center.width())).div_euclid(2),
        (i64::from(h) - i64::from(center.height())).div_euclid(2),
    );

    let mut out = TileImage::black(w, h);
    fill_rows(&mut out.data, w as usize * 3, parallel, |y, row| {
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            px.copy_from_slice(&canvas_pixel(tiles, origin, x as i64, i64::from(y)));
        }
    });
    out
}

/// Assemble, rotate by [`StorySettings::angle_deg`] and centre-crop to the story frame.
#[tracing::instrument(skip(tiles, settings), fields(index = %tiles.index))]
pub fn render_story(
    tiles: &StoryTiles,
    settings: &StorySettings,
    parallel: bool,
) -> JigsawResult<TileImage> {
    settings.validate()?;
    let canvas = assemble_canvas(tiles, settings, parallel);
    let angle = settings.angle_deg(tiles.index);
    tracing::debug!(angle, "rotating story canvas");
    let rotated = rotate_expand(&canvas, angle, parallel);
    Ok(center_crop(&rotated, settings.width, settings.height))
}

#[cfg(test)]
#[path = "../../tests/unit/render/story.rs"]
mod tests;
