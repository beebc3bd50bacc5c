use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jigsaw_mosaic::{
    ArtifactSelection, Batch, FsLayerProvider, JigsawConfig, JigsawRenderer, TileIndex,
    TileRequest,
};

#[derive(Parser, Debug)]
#[command(name = "jigsaw", version, about = "Render jigsaw grid tiles and story mosaics")]
struct Cli {
    /// JSON configuration file (defaults are used for omitted fields).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Asset root containing source/, mask/, bump/, stroke/, tileid/ and overlay/.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Output directory for rendered artifacts.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Worker thread count.
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Render scanlines on the calling thread only.
    #[arg(long, global = true)]
    sequential: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single tile.
    Single(SingleArgs),
    /// Render every tile listed in a batch descriptor, then their stories.
    List(ListArgs),
    /// Render a story mosaic from already rendered tiles.
    Story(StoryArgs),
}

#[derive(Parser, Debug)]
struct SingleArgs {
    /// Tile index in the grid.
    #[arg(short, long, allow_negative_numbers = true)]
    index: i64,

    /// Piece ids to cut out of the tile.
    #[arg(short, long, num_args = 0..)]
    missing: Vec<u32>,

    /// Also write the overlay-less `raw_N.png`.
    #[arg(long)]
    raw: bool,

    /// Also render `story_N.png` once the tile is written.
    #[arg(long)]
    story: bool,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// JSON object mapping tile index to a list of missing piece ids.
    missing_list: PathBuf,

    /// Also write the overlay-less `raw_N.png` variants.
    #[arg(long)]
    raw: bool,

    /// Skip the story phase.
    #[arg(long)]
    no_story: bool,
}

#[derive(Parser, Debug)]
struct StoryArgs {
    /// Tile index at the centre of the mosaic.
    #[arg(short, long, allow_negative_numbers = true)]
    index: i64,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let provider = FsLayerProvider::new(config.layer_settings());
    let renderer = JigsawRenderer::new(&config, &provider)?;

    match cli.cmd {
        Command::Single(args) => cmd_single(&renderer, args),
        Command::List(args) => cmd_list(&renderer, args),
        Command::Story(args) => {
            let path = renderer.write_story(TileIndex(args.index))?;
            eprintln!("wrote {}", path.display());
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<JigsawConfig> {
    let mut config = match &cli.config {
        Some(path) => JigsawConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => JigsawConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.assets_root = root.clone();
    }
    if let Some(out) = &cli.out {
        config.output_dir = out.clone();
    }
    if cli.threads.is_some() {
        config.threading.threads = cli.threads;
    }
    if cli.sequential {
        config.threading.parallel = false;
    }
    config.validate()?;
    Ok(config)
}

fn cmd_single(renderer: &JigsawRenderer<'_>, args: SingleArgs) -> anyhow::Result<()> {
    let req = TileRequest::new(TileIndex(args.index)).with_missing(args.missing);
    let selection = ArtifactSelection {
        post: true,
        raw: args.raw,
        story: args.story,
    };
    for path in renderer.write_tile(&req, selection)? {
        eprintln!("wrote {}", path.display());
    }
    if selection.story {
        let path = renderer.write_story(req.index)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_list(renderer: &JigsawRenderer<'_>, args: ListArgs) -> anyhow::Result<()> {
    let batch = Batch::from_json_file(&args.missing_list)
        .with_context(|| format!("load batch '{}'", args.missing_list.display()))?;
    let selection = ArtifactSelection {
        post: true,
        raw: args.raw,
        story: !args.no_story,
    };
    let report = renderer.run_batch(&batch, selection)?;
    for path in report.tiles.iter().chain(&report.stories) {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
