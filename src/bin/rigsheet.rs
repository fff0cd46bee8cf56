use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use rigsheet::{
    AuthoredCharacter, CharacterConfig, CharacterModel, ClipSpec, PartId, Pose, RenderThreading,
    build_atlas, load_raster, render_pose,
};

#[derive(Parser, Debug)]
#[command(name = "rigsheet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the palette, per-part compression stats, and pivots of a character.
    Inspect(SourceArgs),
    /// Render a single pose as a PNG.
    Frame(FrameArgs),
    /// Render clips into an atlas PNG plus metadata JSON.
    Atlas(AtlasArgs),
}

#[derive(Parser, Debug)]
struct SourceArgs {
    /// Character source: a PNG (auto-segmented) or an authored character JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Character config JSON (bands, scale, padding, layout, clips).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Pose JSON; the rest pose when omitted.
    #[arg(long)]
    pose: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AtlasArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Clip list JSON; overrides the config's clips.
    #[arg(long)]
    clips: Option<PathBuf>,

    /// Output atlas PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output metadata JSON path; defaults to the PNG path with a `.json` extension.
    #[arg(long)]
    meta: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Atlas(args) => cmd_atlas(args),
    }
}

fn load_config(args: &SourceArgs) -> anyhow::Result<CharacterConfig> {
    Ok(match &args.config {
        Some(path) => CharacterConfig::from_path(path)?,
        None => CharacterConfig::default(),
    })
}

fn load_model(args: &SourceArgs, config: &CharacterConfig) -> anyhow::Result<CharacterModel> {
    let is_json = args
        .in_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let model = if is_json {
        AuthoredCharacter::from_path(&args.in_path)?.into_model()?
    } else {
        let raster = load_raster(&args.in_path)?;
        CharacterModel::from_raster(&raster, &config.bands)?
    };
    tracing::info!(
        source = %args.in_path.display(),
        width = model.width(),
        height = model.height(),
        colors = model.palette().len(),
        commands = model.parts().total(),
        "loaded character"
    );
    Ok(model)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read {what} '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {what} '{}'", path.display()))
}

fn cmd_inspect(args: SourceArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let model = load_model(&args, &config)?;

    println!("size      {}x{}", model.width(), model.height());
    println!("identity  {}", model.fingerprint());
    println!("palette   {} colors", model.palette().len());
    for (i, color) in model.palette().colors().iter().enumerate() {
        println!("  {i:>3}  {}", color.to_hex());
    }
    println!("parts");
    for part in PartId::ALL {
        let stats = model.part_stats(part);
        println!(
            "  {:<11} {:>5} px  {:>4} cmds  {:>6.2} px/cmd",
            part.name(),
            stats.pixels,
            stats.commands,
            stats.pixels_per_command()
        );
    }
    let total = model.total_stats();
    println!(
        "  {:<11} {:>5} px  {:>4} cmds  {:>6.2} px/cmd",
        "total",
        total.pixels,
        total.commands,
        total.pixels_per_command()
    );
    println!("pivots");
    for (joint, at) in model.pivots().iter() {
        println!("  {:<14} ({:.2}, {:.2})", joint.name(), at.x, at.y);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    let model = load_model(&args.source, &config)?;
    let pose: Pose = match &args.pose {
        Some(path) => read_json(path, "pose")?,
        None => Pose::rest(),
    };
    for name in pose.unknown_joints() {
        tracing::warn!(joint = name, "ignoring unknown joint");
    }

    let frame = render_pose(&model, &pose, &config.render_settings(&model))?;
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_atlas(args: AtlasArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    let model = load_model(&args.source, &config)?;
    let clips: Vec<ClipSpec> = match &args.clips {
        Some(path) => read_json(path, "clip list")?,
        None => config.clips(),
    };
    let threading = RenderThreading {
        parallel: args.parallel || config.threading.parallel,
        threads: args.threads.or(config.threading.threads),
        ..config.threading.clone()
    };

    let atlas = build_atlas(
        &model,
        &clips,
        &config.layout,
        &config.render_settings(&model),
        &threading,
    )?;
    let meta_path = args
        .meta
        .clone()
        .unwrap_or_else(|| args.out.with_extension("json"));
    atlas.save_png(&args.out)?;
    atlas.metadata().save(&meta_path)?;

    let stats = atlas.stats();
    tracing::info!(
        frames = atlas.frame_count(),
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        width = atlas.width(),
        height = atlas.height(),
        "built atlas"
    );
    eprintln!("wrote {} and {}", args.out.display(), meta_path.display());
    Ok(())
}
