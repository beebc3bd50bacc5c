use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::assets::provider::LayerSettings;
use crate::foundation::core::GridGeometry;
use crate::foundation::error::{JigsawError, JigsawResult};
use crate::render::pipeline::RenderThreading;
use crate::render::story::StorySettings;

/// Complete renderer configuration.
///
/// Every section has defaults, so a JSON file only needs the fields it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct JigsawConfig {
    /// Tile geometry.
    pub grid: GridGeometry,
    /// Template cycle for mask/bump/stroke/tile-id assets.
    pub templates: Vec<String>,
    /// Root of the asset directories.
    pub assets_root: PathBuf,
    /// Artifact output directory.
    pub output_dir: PathBuf,
    /// Story mosaic parameters.
    pub story: StorySettings,
    /// Worker pool configuration.
    pub threading: RenderThreading,
}

impl Default for JigsawConfig {
    fn default() -> Self {
        Self {
            grid: GridGeometry::default(),
            templates: ["a", "b", "c", "d", "e", "f", "g"]
                .into_iter()
                .map(String::from)
                .collect(),
            assets_root: PathBuf::from("."),
            output_dir: PathBuf::from("output"),
            story: StorySettings::default(),
            threading: RenderThreading::default(),
        }
    }
}

impl JigsawConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> JigsawResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| JigsawError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_json_file(path: &Path) -> JigsawResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> JigsawResult<()> {
        self.grid.validate()?;
        if self.templates.is_empty() {
            return Err(JigsawError::config("templates must not be empty"));
        }
        if self.templates.iter().any(|t| t.is_empty()) {
            return Err(JigsawError::config("template names must not be empty"));
        }

        let s = &self.story;
        if s.width == 0 || s.height == 0 || s.canvas_width == 0 || s.canvas_height == 0 {
            return Err(JigsawError::config("story dimensions must be >= 1"));
        }
        let span = u64::from(self.grid.target_size) * 3;
        if u64::from(s.canvas_width) > span || u64::from(s.canvas_height) > span {
            return Err(JigsawError::config(format!(
                "story canvas {}x{} exceeds the 3x3 tile neighbourhood ({span}px)",
                s.canvas_width, s.canvas_height
            )));
        }
        if !(s.angle_step_deg.is_finite()
            && s.angle_offset_deg.is_finite()
            && s.angle_modulus_deg.is_finite()
            && s.angle_modulus_deg > 0.0)
        {
            return Err(JigsawError::config(
                "story angle parameters must be finite with modulus > 0",
            ));
        }

        if self.threading.threads == Some(0) {
            return Err(JigsawError::config("threading.threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Provider settings derived from this configuration.
    pub fn layer_settings(&self) -> LayerSettings {
        LayerSettings {
            geometry: self.grid,
            templates: self.templates.clone(),
            assets_root: self.assets_root.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
