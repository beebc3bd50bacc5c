use std::sync::Arc;

use crate::foundation::core::TileIndex;
use crate::foundation::error::{JigsawError, JigsawResult};

/// Kind of raster a tile render consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    /// Per-tile photograph crop, `input_size` square.
    Source,
    /// Template mask; red channel is the tile's own alpha.
    Mask,
    /// Template bump map; red channel encodes simulated height.
    Bump,
    /// Template stroke map; red channel is low along piece seams.
    Stroke,
    /// Template piece-id map, decoded per pixel.
    TileId,
    /// Per-tile RGBA badge layer composited last.
    Overlay,
    /// Previously rendered `post` tile, consumed by the story mosaic.
    RenderedPost,
}

/// Value substituted when a layer's asset is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// Solid RGBA8 fill.
    Solid([u8; 4]),
    /// Opaque colour derived from the tile index.
    IndexDerived,
}

impl LayerKind {
    /// All kinds, in pipeline order.
    pub const ALL: [LayerKind; 7] = [
        LayerKind::Source,
        LayerKind::Mask,
        LayerKind::Bump,
        LayerKind::Stroke,
        LayerKind::TileId,
        LayerKind::Overlay,
        LayerKind::RenderedPost,
    ];

    /// Placeholder used when the asset is missing or unusable.
    pub fn placeholder(self) -> Placeholder {
        match self {
            LayerKind::Source | LayerKind::Mask => Placeholder::Solid([0, 0, 0, 255]),
            LayerKind::Bump => Placeholder::Solid([128, 128, 128, 255]),
            LayerKind::Stroke | LayerKind::TileId => Placeholder::Solid([255, 255, 255, 255]),
            LayerKind::Overlay => Placeholder::Solid([0, 0, 0, 0]),
            LayerKind::RenderedPost => Placeholder::IndexDerived,
        }
    }

    /// Whether the asset is shared by every tile using the same template.
    pub fn is_template(self) -> bool {
        matches!(
            self,
            LayerKind::Mask | LayerKind::Bump | LayerKind::Stroke | LayerKind::TileId
        )
    }

    /// Short lowercase name used in logs and file names.
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Source => "source",
            LayerKind::Mask => "mask",
            LayerKind::Bump => "bump",
            LayerKind::Stroke => "stroke",
            LayerKind::TileId => "tileid",
            LayerKind::Overlay => "overlay",
            LayerKind::RenderedPost => "post",
        }
    }
}

impl Placeholder {
    /// Resolve to a concrete RGBA8 colour for `index`.
    pub fn rgba(self, index: TileIndex) -> [u8; 4] {
        match self {
            Placeholder::Solid(c) => c,
            Placeholder::IndexDerived => {
                let h = mix64(index.0 as u64 ^ 0x9E37_79B9_7F4A_7C15);
                [(h >> 40) as u8, (h >> 24) as u8, (h >> 8) as u8, 255]
            }
        }
    }
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Immutable RGBA8 raster for one `(kind, index)` pair.
///
/// Cloning is cheap; pixel bytes are shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerBuffer {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl LayerBuffer {
    /// Wrap row-major RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> JigsawResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| JigsawError::validation("layer buffer size overflow"))?;
        if rgba8.len() != expected {
            return Err(JigsawError::validation(format!(
                "layer buffer expects {expected} bytes for {width}x{height}, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Wrap row-major RGB8 bytes; alpha becomes 255.
    pub fn from_rgb8(width: u32, height: u32, rgb8: &[u8]) -> JigsawResult<Self> {
        if rgb8.len() != width as usize * height as usize * 3 {
            return Err(JigsawError::validation(
                "layer buffer expects rgb8 bytes matching width*height*3",
            ));
        }
        let mut rgba8 = Vec::with_capacity(rgb8.len() / 3 * 4);
        for px in rgb8.chunks_exact(3) {
            rgba8.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Self::from_rgba8(width, height, rgba8)
    }

    /// Buffer filled with one colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            rgba8: Arc::new(rgba.repeat(width as usize * height as usize)),
        }
    }

    /// Placeholder buffer for `kind` at `index`.
    pub fn placeholder(kind: LayerKind, index: TileIndex, width: u32, height: u32) -> Self {
        Self::solid(width, height, kind.placeholder().rgba(index))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn as_rgba8(&self) -> &[u8] {
        &self.rgba8
    }

    /// RGBA at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.rgba8[i..i + 4];
        [p[0], p[1], p[2], p[3]]
    }

    /// RGBA at signed coordinates, `None` outside the buffer.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(self.rgba(x as u32, y as u32))
    }

    /// First channel at `(x, y)` scaled by `1/256`, as used for mask/bump/stroke weights.
    #[inline]
    pub fn weight(&self, x: u32, y: u32) -> f32 {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        f32::from(self.rgba8[i]) / 256.0
    }

    /// Whether the buffer is `size` pixels square.
    pub fn is_square(&self, size: u32) -> bool {
        self.width == size && self.height == size
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/layer.rs"]
mod tests;
