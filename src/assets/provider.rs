use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::assets::decode::decode_layer;
use crate::assets::layer::{LayerBuffer, LayerKind};
use crate::foundation::core::{ArtifactKind, GridGeometry, TileIndex};

/// Source of layer rasters for the compositor.
///
/// Implementations must always return a buffer of the expected size for `kind`
/// (see [`LayerSettings::expected_size`]), substituting [`LayerKind::placeholder`] when the
/// backing asset is absent. Loading never fails.
pub trait LayerProvider: Send + Sync {
    /// Load the `kind` layer for tile `index`.
    fn load(&self, kind: LayerKind, index: TileIndex) -> LayerBuffer;
}

/// Explicit provider configuration (template cycle, geometry, roots).
#[derive(Clone, Debug)]
pub struct LayerSettings {
    /// Tile geometry; determines expected layer sizes.
    pub geometry: GridGeometry,
    /// Template names, selected by `index mod templates.len()`.
    pub templates: Vec<String>,
    /// Root of the `source/`, `mask/`, `bump/`, ... asset directories.
    pub assets_root: PathBuf,
    /// Directory where rendered artifacts are written and read back.
    pub output_dir: PathBuf,
}

impl LayerSettings {
    /// Template name for `index`. Negative indices wrap.
    pub fn template_for(&self, index: TileIndex) -> &str {
        if self.templates.is_empty() {
            return "";
        }
        let n = self.templates.len() as i64;
        &self.templates[index.0.rem_euclid(n) as usize]
    }

    /// Square edge length a `kind` buffer must have.
    pub fn expected_size(&self, kind: LayerKind) -> u32 {
        match kind {
            LayerKind::RenderedPost => self.geometry.target_size,
            _ => self.geometry.input_size(),
        }
    }

    /// Conventional asset path for `(kind, index)`.
    pub fn path_for(&self, kind: LayerKind, index: TileIndex) -> PathBuf {
        match kind {
            LayerKind::Source => self.assets_root.join("source").join(format!("{}.png", index.0)),
            LayerKind::Overlay => self
                .assets_root
                .join("overlay")
                .join(format!("overlay_{}.png", index.0)),
            LayerKind::Mask | LayerKind::Bump | LayerKind::Stroke | LayerKind::TileId => {
                let name = kind.name();
                self.assets_root
                    .join(name)
                    .join(format!("{name}_{}.png", self.template_for(index)))
            }
            LayerKind::RenderedPost => self.output_dir.join(ArtifactKind::Post.file_name(index)),
        }
    }

    /// Placeholder buffer of the expected size.
    pub fn placeholder(&self, kind: LayerKind, index: TileIndex) -> LayerBuffer {
        let size = self.expected_size(kind);
        LayerBuffer::placeholder(kind, index, size, size)
    }
}

/// Provider reading PNG assets from the conventional directory layout.
#[derive(Clone, Debug)]
pub struct FsLayerProvider {
    settings: LayerSettings,
}

impl FsLayerProvider {
    /// Create a provider over `settings`.
    pub fn new(settings: LayerSettings) -> Self {
        Self { settings }
    }

    /// Provider configuration.
    pub fn settings(&self) -> &LayerSettings {
        &self.settings
    }

    fn load_file(&self, kind: LayerKind, index: TileIndex, path: &Path) -> Option<LayerBuffer> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(layer = kind.name(), %index, path = %path.display(), "file does not exist");
                return None;
            }
            Err(err) => {
                tracing::warn!(layer = kind.name(), %index, path = %path.display(), error = %err, "failed to read layer");
                return None;
            }
        };
        let layer = match decode_layer(&bytes) {
            Ok(layer) => layer,
            Err(err) => {
                tracing::warn!(layer = kind.name(), %index, path = %path.display(), error = %err, "failed to decode layer");
                return None;
            }
        };
        let size = self.settings.expected_size(kind);
        if !layer.is_square(size) {
            tracing::warn!(
                layer = kind.name(),
                %index,
                path = %path.display(),
                width = layer.width(),
                height = layer.height(),
                expected = size,
                "layer has unexpected dimensions"
            );
            return None;
        }
        Some(layer)
    }
}

impl LayerProvider for FsLayerProvider {
    fn load(&self, kind: LayerKind, index: TileIndex) -> LayerBuffer {
        let path = self.settings.path_for(kind, index);
        self.load_file(kind, index, &path)
            .unwrap_or_else(|| self.settings.placeholder(kind, index))
    }
}

/// In-memory provider that records every request.
///
/// Layers not inserted resolve to placeholders of the expected size.
#[derive(Debug)]
pub struct MemoryLayerProvider {
    settings: LayerSettings,
    per_tile: HashMap<(LayerKind, TileIndex), LayerBuffer>,
    per_template: HashMap<(LayerKind, String), LayerBuffer>,
    requests: Mutex<Vec<(LayerKind, TileIndex)>>,
}

impl MemoryLayerProvider {
    /// Empty provider; every load yields a placeholder until layers are inserted.
    pub fn new(settings: LayerSettings) -> Self {
        Self {
            settings,
            per_tile: HashMap::new(),
            per_template: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Register a per-tile layer (`Source`, `Overlay`, `RenderedPost`).
    ///
    /// Template kinds inserted here override the template lookup for this index only.
    pub fn insert(&mut self, kind: LayerKind, index: TileIndex, buffer: LayerBuffer) {
        self.per_tile.insert((kind, index), buffer);
    }

    /// Register a template layer shared by every index using `template`.
    pub fn insert_template(&mut self, kind: LayerKind, template: &str, buffer: LayerBuffer) {
        self.per_template.insert((kind, template.to_string()), buffer);
    }

    /// All `(kind, index)` pairs requested so far, in call order.
    pub fn requests(&self) -> Vec<(LayerKind, TileIndex)> {
        match self.requests.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Provider configuration.
    pub fn settings(&self) -> &LayerSettings {
        &self.settings
    }
}

impl LayerProvider for MemoryLayerProvider {
    fn load(&self, kind: LayerKind, index: TileIndex) -> LayerBuffer {
        match self.requests.lock() {
            Ok(mut guard) => guard.push((kind, index)),
            Err(poisoned) => poisoned.into_inner().push((kind, index)),
        }

        if let Some(buf) = self.per_tile.get(&(kind, index)) {
            return buf.clone();
        }
        if kind.is_template() {
            let template = self.settings.template_for(index).to_string();
            if let Some(buf) = self.per_template.get(&(kind, template)) {
                return buf.clone();
            }
        }
        tracing::debug!(layer = kind.name(), %index, "no in-memory layer, using placeholder");
        self.settings.placeholder(kind, index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/provider.rs"]
mod tests;
