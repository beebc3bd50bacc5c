use std::collections::BTreeSet;

/// Decode a tile-id layer pixel into the piece it belongs to.
///
/// Each channel is quantized to a base-3 digit (`channel / 85`) with radix weights 16, 4 and 1;
/// all divisions truncate. `(0, 0, 0)` decodes to 0.
#[inline]
pub fn decode_tile_id(rgb: [u8; 3]) -> u32 {
    let [r, g, b] = rgb.map(u32::from);
    r * 16 / 85 + g * 4 / 85 + b / 85
}

/// Piece ids that render as a black cutout for one tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MissingSet(BTreeSet<u32>);

impl MissingSet {
    /// Empty set; nothing is cut out.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` must be cut out.
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    /// Whether no piece is cut out.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for MissingSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tile_id.rs"]
mod tests;
