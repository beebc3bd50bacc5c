use crate::assets::layer::{LayerBuffer, LayerKind};
use crate::assets::provider::LayerProvider;
use crate::foundation::core::{GridGeometry, TileImage, TileIndex};
use crate::foundation::error::{JigsawError, JigsawResult};
use crate::render::bleed::{BleedLayers, MaskedSource, Side, base_color};
use crate::render::fill_rows;
use crate::render::shade::{bump, overlay, stroke, to_rgb8};
use crate::render::tile_id::{MissingSet, decode_tile_id};

/// Every raster a single tile render reads, loaded up front.
#[derive(Clone, Debug)]
pub struct TileLayers {
    /// Tile the layers belong to.
    pub index: TileIndex,
    /// Own and neighbouring source/mask pairs.
    pub bleed: BleedLayers,
    /// Bump map (red channel).
    pub bump: LayerBuffer,
    /// Stroke map (red channel).
    pub stroke: LayerBuffer,
    /// Piece-id map.
    pub tile_id: LayerBuffer,
    /// RGBA overlay.
    pub overlay: LayerBuffer,
}

impl TileLayers {
    /// Load all layers for `index`, including the four bleed neighbours.
    pub fn load(provider: &dyn LayerProvider, index: TileIndex, geom: &GridGeometry) -> Self {
        let masked = |i: TileIndex| MaskedSource {
            source: provider.load(LayerKind::Source, i),
            mask: provider.load(LayerKind::Mask, i),
        };
        let own = masked(index);
        let neighbors = Side::ALL.map(|side| masked(side.neighbor(index, geom.row_count)));

        Self {
            index,
            bleed: BleedLayers { own, neighbors },
            bump: provider.load(LayerKind::Bump, index),
            stroke: provider.load(LayerKind::Stroke, index),
            tile_id: provider.load(LayerKind::TileId, index),
            overlay: provider.load(LayerKind::Overlay, index),
        }
    }

    fn validate(&self, geom: &GridGeometry) -> JigsawResult<()> {
        let size = geom.input_size();
        let mut named: Vec<(&str, &LayerBuffer)> = vec![
            ("source", &self.bleed.own.source),
            ("mask", &self.bleed.own.mask),
            ("bump", &self.bump),
            ("stroke", &self.stroke),
            ("tileid", &self.tile_id),
            ("overlay", &self.overlay),
        ];
        for n in &self.bleed.neighbors {
            named.push(("neighbour source", &n.source));
            named.push(("neighbour mask", &n.mask));
        }
        for (name, buf) in named {
            if !buf.is_square(size) {
                return Err(JigsawError::validation(format!(
                    "{name} layer for tile {} is {}x{}, expected {size}x{size}",
                    self.index,
                    buf.width(),
                    buf.height()
                )));
            }
        }
        Ok(())
    }
}

/// Per-render switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRenderOpts {
    /// Composite the overlay layer last; `false` yields the raw variant.
    pub with_overlay: bool,
    /// Split scanlines across the current rayon pool.
    pub parallel: bool,
}

impl Default for TileRenderOpts {
    fn default() -> Self {
        Self {
            with_overlay: true,
            parallel: true,
        }
    }
}

/// Final RGB8 value of destination pixel `(x, y)`.
///
/// Order: tile-id decode, bleed, bump, cutout, stroke, overlay.
#[inline]
pub fn compose_pixel(
    layers: &TileLayers,
    geom: &GridGeometry,
    missing: &MissingSet,
    with_overlay: bool,
    x: u32,
    y: u32,
) -> [u8; 3] {
    let x_in = x + geom.margin;
    let y_in = y + geom.margin;

    let id_px = layers.tile_id.rgba(x_in, y_in);
    let tile_id = decode_tile_id([id_px[0], id_px[1], id_px[2]]);

    let pixel = if missing.contains(tile_id) {
        [0.0; 3]
    } else {
        let base = base_color(&layers.bleed, geom, x, y);
        bump(base, layers.bump.weight(x_in, y_in))
    };

    let jigsaw = stroke(pixel, layers.stroke.weight(x_in, y_in));
    let out = if with_overlay {
        overlay(jigsaw, layers.overlay.rgba(x_in, y_in))
    } else {
        jigsaw
    };
    to_rgb8(out)
}

/// Render one `target_size` square RGB tile.
#[tracing::instrument(skip(layers, geom, missing), fields(index = %layers.index))]
pub fn render_tile(
    layers: &TileLayers,
    geom: &GridGeometry,
    missing: &MissingSet,
    opts: TileRenderOpts,
) -> JigsawResult<TileImage> {
    geom.validate()?;
    layers.validate(geom)?;

    let size = geom.target_size;
    let mut out = TileImage::black(size, size);
    fill_rows(&mut out.data, size as usize * 3, opts.parallel, |y, row| {
        for (x, px) in row.chunks_exact_mut(3).enumerate() {
            let rgb = compose_pixel(layers, geom, missing, opts.with_overlay, x as u32, y);
            px.copy_from_slice(&rgb);
        }
    });
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/tile.rs"]
mod tests;
