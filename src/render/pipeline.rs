use std::path::PathBuf;
use std::time::Instant;

use crate::assets::decode::write_png;
use crate::assets::provider::LayerProvider;
use crate::batch::{Batch, TileRequest};
use crate::config::JigsawConfig;
use crate::foundation::core::{ArtifactKind, TileImage, TileIndex};
use crate::foundation::error::{JigsawError, JigsawResult};
use crate::render::story::{StoryTiles, render_story};
use crate::render::tile::{TileLayers, TileRenderOpts, render_tile};
use crate::render::tile_id::MissingSet;

/// Worker pool configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Split each render's scanlines across worker threads.
    pub parallel: bool,
    /// Pool size; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Which artifacts a render writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArtifactSelection {
    /// Tile with overlay (`post_N.png`).
    pub post: bool,
    /// Tile without overlay (`raw_N.png`).
    pub raw: bool,
    /// Story mosaic (`story_N.png`), rendered after all tiles.
    pub story: bool,
}

impl Default for ArtifactSelection {
    fn default() -> Self {
        Self {
            post: true,
            raw: false,
            story: true,
        }
    }
}

/// Paths written by a batch run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Tile artifacts, in render order.
    pub tiles: Vec<PathBuf>,
    /// Story artifacts, in render order.
    pub stories: Vec<PathBuf>,
}

/// Renders tiles and stories for one configuration and layer provider.
pub struct JigsawRenderer<'a> {
    config: &'a JigsawConfig,
    provider: &'a dyn LayerProvider,
    pool: rayon::ThreadPool,
}

impl<'a> JigsawRenderer<'a> {
    /// Validate `config` and build the worker pool.
    pub fn new(config: &'a JigsawConfig, provider: &'a dyn LayerProvider) -> JigsawResult<Self> {
        config.validate()?;
        let pool = build_thread_pool(config.threading.threads)?;
        Ok(Self {
            config,
            provider,
            pool,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &JigsawConfig {
        self.config
    }

    /// Render one tile in memory.
    pub fn render_tile(
        &self,
        index: TileIndex,
        missing: &MissingSet,
        with_overlay: bool,
    ) -> JigsawResult<TileImage> {
        let geom = &self.config.grid;
        let layers = TileLayers::load(self.provider, index, geom);
        let opts = TileRenderOpts {
            with_overlay,
            parallel: self.config.threading.parallel,
        };
        self.pool
            .install(|| render_tile(&layers, geom, missing, opts))
    }

    /// Render the selected tile variants of `req` and write them to the output directory.
    pub fn write_tile(
        &self,
        req: &TileRequest,
        selection: ArtifactSelection,
    ) -> JigsawResult<Vec<PathBuf>> {
        tracing::info!(
            index = %req.index,
            missing = ?req.missing.iter().collect::<Vec<_>>(),
            "generating jigsaw tile"
        );
        let started = Instant::now();
        let geom = &self.config.grid;
        let layers = TileLayers::load(self.provider, req.index, geom);

        let mut written = Vec::new();
        for (enabled, kind, with_overlay) in [
            (selection.post, ArtifactKind::Post, true),
            (selection.raw, ArtifactKind::Raw, false),
        ] {
            if !enabled {
                continue;
            }
            let opts = TileRenderOpts {
                with_overlay,
                parallel: self.config.threading.parallel,
            };
            let img = self
                .pool
                .install(|| render_tile(&layers, geom, &req.missing, opts))?;
            written.push(self.write_artifact(kind, req.index, &img)?);
        }
        tracing::debug!(index = %req.index, elapsed_ms = started.elapsed().as_millis() as u64, "tile done");
        Ok(written)
    }

    /// Render the story mosaic for `index` in memory from already rendered tiles.
    pub fn render_story(&self, index: TileIndex) -> JigsawResult<TileImage> {
        let tiles = StoryTiles::load(self.provider, index, self.config.grid.row_count);
        let parallel = self.config.threading.parallel;
        self.pool
            .install(|| render_story(&tiles, &self.config.story, parallel))
    }

    /// Render and write `story_N.png`.
    pub fn write_story(&self, index: TileIndex) -> JigsawResult<PathBuf> {
        tracing::info!(%index, "generating story mosaic");
        let img = self.render_story(index)?;
        self.write_artifact(ArtifactKind::Story, index, &img)
    }

    /// Render every tile of `batch`, then every story.
    ///
    /// Stories read the tiles written in the first phase, so no story starts before all tiles
    /// are on disk.
    pub fn run_batch(&self, batch: &Batch, selection: ArtifactSelection) -> JigsawResult<BatchReport> {
        if selection.story && !selection.post {
            return Err(JigsawError::validation(
                "story mosaics require post tiles to be rendered",
            ));
        }

        let mut report = BatchReport::default();
        for req in &batch.requests {
            report.tiles.extend(self.write_tile(req, selection)?);
        }
        if selection.story {
            for req in &batch.requests {
                report.stories.push(self.write_story(req.index)?);
            }
        }
        Ok(report)
    }

    fn write_artifact(
        &self,
        kind: ArtifactKind,
        index: TileIndex,
        img: &TileImage,
    ) -> JigsawResult<PathBuf> {
        let path = self.config.output_dir.join(kind.file_name(index));
        write_png(&path, img)?;
        tracing::info!(path = %path.display(), "generated file");
        Ok(path)
    }
}

fn build_thread_pool(threads: Option<usize>) -> JigsawResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(JigsawError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| JigsawError::render(format!("failed to build rayon thread pool: {e}")))
}
