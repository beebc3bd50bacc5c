//! Neighbour-aware edge bleeding.
//!
//! Every destination pixel starts from the tile's own `source * mask_alpha`. Pixels inside a
//! margin band additionally receive `neighbour_source * neighbour_mask_alpha`, sampled from the
//! adjacent tile's opposite edge. Corner pixels inside two bands receive both contributions.
//!
//! The weights are not normalized: own and neighbour mask alphas may sum above 1.0 along a seam,
//! which brightens it.

use crate::assets::layer::LayerBuffer;
use crate::foundation::core::{GridGeometry, TileIndex};
use crate::render::shade::Rgbf;

/// Margin band of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// `x < margin`; bled from `index + 1`.
    Left,
    /// `x > target - margin`; bled from `index - 1`.
    Right,
    /// `y < margin`; bled from `index + row_count`.
    Top,
    /// `y > target - margin`; bled from `index - row_count`.
    Bottom,
}

impl Side {
    /// All sides in evaluation order.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Index of the tile adjacent on this side.
    pub fn neighbor(self, index: TileIndex, row_count: u32) -> TileIndex {
        match self {
            Side::Left => index.left(row_count),
            Side::Right => index.right(row_count),
            Side::Top => index.up(row_count),
            Side::Bottom => index.down(row_count),
        }
    }

    /// Whether destination pixel `(x, y)` lies in this side's band.
    #[inline]
    pub fn contains(self, x: u32, y: u32, geom: &GridGeometry) -> bool {
        let far = geom.target_size - geom.margin;
        match self {
            Side::Left => x < geom.margin,
            Side::Right => x > far,
            Side::Top => y < geom.margin,
            Side::Bottom => y > far,
        }
    }

    /// Input-space offset from a pixel to the mirrored pixel of the neighbour.
    #[inline]
    pub fn sample_offset(self, geom: &GridGeometry) -> (i64, i64) {
        let t = i64::from(geom.target_size);
        match self {
            Side::Left => (t, 0),
            Side::Right => (-t, 0),
            Side::Top => (0, t),
            Side::Bottom => (0, -t),
        }
    }
}

/// Source and mask of one tile.
#[derive(Clone, Debug)]
pub struct MaskedSource {
    /// Photograph crop.
    pub source: LayerBuffer,
    /// Template mask (red channel = alpha).
    pub mask: LayerBuffer,
}

impl MaskedSource {
    /// Weighted colour contribution at input coordinates.
    #[inline]
    fn contribution(&self, x: u32, y: u32) -> Rgbf {
        let px = self.source.rgba(x, y);
        let a = self.mask.weight(x, y);
        [
            f32::from(px[0]) * a,
            f32::from(px[1]) * a,
            f32::from(px[2]) * a,
        ]
    }
}

/// Own tile plus its four orthogonal neighbours, ordered as [`Side::ALL`].
#[derive(Clone, Debug)]
pub struct BleedLayers {
    /// The tile being rendered.
    pub own: MaskedSource,
    /// Neighbours in [`Side::ALL`] order.
    pub neighbors: [MaskedSource; 4],
}

impl BleedLayers {
    /// Neighbour on `side`.
    pub fn neighbor(&self, side: Side) -> &MaskedSource {
        let i = match side {
            Side::Left => 0,
            Side::Right => 1,
            Side::Top => 2,
            Side::Bottom => 3,
        };
        &self.neighbors[i]
    }
}

/// Unclamped blended base colour for destination pixel `(x, y)`.
///
/// Buffers must be `geom.input_size()` square.
#[inline]
pub fn base_color(layers: &BleedLayers, geom: &GridGeometry, x: u32, y: u32) -> Rgbf {
    let x_in = x + geom.margin;
    let y_in = y + geom.margin;
    let mut acc = layers.own.contribution(x_in, y_in);

    for side in Side::ALL {
        if !side.contains(x, y, geom) {
            continue;
        }
        let (dx, dy) = side.sample_offset(geom);
        let nx = (i64::from(x_in) + dx) as u32;
        let ny = (i64::from(y_in) + dy) as u32;
        let c = layers.neighbor(side).contribution(nx, ny);
        acc[0] += c[0];
        acc[1] += c[1];
        acc[2] += c[2];
    }
    acc
}

#[cfg(test)]
#[path = "../../tests/unit/render/bleed.rs"]
mod tests;
