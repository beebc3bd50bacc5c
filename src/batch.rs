//! Batch descriptor: JSON object mapping tile index to the piece ids cut out of that tile.
//!
//! ```json
//! { "5": [2], "6": [], "7": null }
//! ```

use std::path::Path;

use anyhow::Context;

use crate::foundation::core::TileIndex;
use crate::foundation::error::{JigsawError, JigsawResult};
use crate::render::tile_id::MissingSet;

/// One tile render request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileRequest {
    /// Tile to render.
    pub index: TileIndex,
    /// Pieces rendered as cutouts.
    pub missing: MissingSet,
}

impl TileRequest {
    /// Request with nothing cut out.
    pub fn new(index: TileIndex) -> Self {
        Self {
            index,
            missing: MissingSet::new(),
        }
    }

    /// Replace the missing set.
    pub fn with_missing(mut self, missing: impl IntoIterator<Item = u32>) -> Self {
        self.missing = missing.into_iter().collect();
        self
    }
}

/// Validated batch, sorted by tile index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    /// Requests in ascending index order.
    pub requests: Vec<TileRequest>,
}

impl Batch {
    /// Parse a descriptor. Any malformed entry rejects the whole batch.
    pub fn from_json_str(s: &str) -> JigsawResult<Self> {
        let value: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| JigsawError::serde(format!("parse batch JSON: {e}")))?;
        let obj = value
            .as_object()
            .ok_or_else(|| JigsawError::config("batch descriptor must be a JSON object"))?;

        let mut requests = Vec::with_capacity(obj.len());
        for (key, ids) in obj {
            let index: i64 = key.trim().parse().map_err(|_| {
                JigsawError::config(format!("batch key '{key}' is not an integer tile index"))
            })?;
            let missing = parse_missing(key, ids)?;
            requests.push(TileRequest {
                index: TileIndex(index),
                missing,
            });
        }

        requests.sort_by_key(|r| r.index);
        if let Some(w) = requests.windows(2).find(|w| w[0].index == w[1].index) {
            return Err(JigsawError::config(format!(
                "batch lists tile {} more than once",
                w[0].index
            )));
        }
        Ok(Self { requests })
    }

    /// Read and parse a descriptor file.
    pub fn from_json_file(path: &Path) -> JigsawResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read batch '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the batch has no tiles.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

fn parse_missing(key: &str, ids: &serde_json::Value) -> JigsawResult<MissingSet> {
    let list = match ids {
        serde_json::Value::Null => return Ok(MissingSet::new()),
        serde_json::Value::Array(list) => list,
        other => {
            return Err(JigsawError::config(format!(
                "batch entry '{key}' must be a list of tile ids, got {other}"
            )));
        }
    };
    list.iter()
        .map(|id| {
            id.as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    JigsawError::config(format!(
                        "batch entry '{key}' has invalid tile id {id} (expected a non-negative integer)"
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
