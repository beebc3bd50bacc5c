use crate::foundation::error::{JigsawError, JigsawResult};

/// Grid cell identifier.
///
/// Grid position is implicit: horizontal neighbours are `index ± 1` and vertical neighbours are
/// `index ± row_count`. Indices outside the populated grid are valid values; the layer provider
/// answers them with placeholders.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TileIndex(pub i64);

impl TileIndex {
    /// Shift by `dx` columns and `dy` rows on a grid `row_count` tiles wide.
    ///
    /// Positive `dx` moves left (`index + 1`), positive `dy` moves up (`index + row_count`).
    pub fn offset(self, dx: i64, dy: i64, row_count: u32) -> Self {
        Self(self.0 + dx + dy * i64::from(row_count))
    }

    /// Tile whose right edge bleeds into this tile's left margin.
    pub fn left(self, row_count: u32) -> Self {
        self.offset(1, 0, row_count)
    }

    /// Tile whose left edge bleeds into this tile's right margin.
    pub fn right(self, row_count: u32) -> Self {
        self.offset(-1, 0, row_count)
    }

    /// Tile whose bottom edge bleeds into this tile's top margin.
    pub fn up(self, row_count: u32) -> Self {
        self.offset(0, 1, row_count)
    }

    /// Tile whose top edge bleeds into this tile's bottom margin.
    pub fn down(self, row_count: u32) -> Self {
        self.offset(0, -1, row_count)
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed tile geometry shared by every layer and render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    /// Edge length of a rendered tile.
    pub target_size: u32,
    /// Overlap band on each side of the tile inside the raw input frame.
    pub margin: u32,
    /// Number of tiles per grid row.
    pub row_count: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            target_size: 1024,
            margin: 72,
            row_count: 3,
        }
    }
}

impl GridGeometry {
    /// Edge length of raw input layers (`target_size + 2 * margin`).
    pub fn input_size(&self) -> u32 {
        self.target_size + 2 * self.margin
    }

    /// Reject geometries the compositor cannot address.
    pub fn validate(&self) -> JigsawResult<()> {
        if self.row_count == 0 {
            return Err(JigsawError::config("grid.row_count must be >= 1"));
        }
        if self.target_size == 0 {
            return Err(JigsawError::config("grid.target_size must be >= 1"));
        }
        if u64::from(self.margin) * 2 >= u64::from(self.target_size) {
            return Err(JigsawError::config(
                "grid.margin must be smaller than half of grid.target_size",
            ));
        }
        Ok(())
    }
}

/// Finished RGB8 raster (tile or story image).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGB8 bytes, `width * height * 3` long.
    pub data: Vec<u8>,
}

impl TileImage {
    /// Black image of the given size.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    /// Pixel at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Persisted output variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Tile with overlay composited.
    Post,
    /// Tile without overlay.
    Raw,
    /// Rotated and cropped story mosaic.
    Story,
}

impl ArtifactKind {
    /// Label used as the file name prefix.
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Post => "post",
            ArtifactKind::Raw => "raw",
            ArtifactKind::Story => "story",
        }
    }

    /// Deterministic file name, e.g. `post_5.png`.
    pub fn file_name(self, index: TileIndex) -> String {
        format!("{}_{}.png", self.label(), index.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
