use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Font file used when the configuration does not name one.
const FONT_ENV: &str = "CHARTREEL_FONT";

#[derive(Parser, Debug)]
#[command(name = "chartreel", version, about = "Animated line and scatter charts")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animation to a video or GIF (video formats require `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Write an HTML file with the animation embedded as an MP4 (requires `ffmpeg`).
    Html(HtmlArgs),
    /// Print the per-frame table as JSON.
    Inspect(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input table JSON.
    #[arg(long)]
    table: PathBuf,

    /// Chart configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output path; `.gif` writes a GIF, other extensions go through ffmpeg.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct HtmlArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Html(args) => cmd_html(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn load(input: &InputArgs) -> anyhow::Result<(chartreel::Table, chartreel::ChartConfig)> {
    let table = chartreel::Table::from_path(&input.table)
        .with_context(|| format!("load table '{}'", input.table.display()))?;
    let mut config = match &input.config {
        Some(path) => chartreel::ChartConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => chartreel::ChartConfig::default(),
    };
    if config.font_path.is_none() {
        config.font_path = std::env::var_os(FONT_ENV).map(PathBuf::from);
    }
    Ok((table, config))
}

fn animation(input: &InputArgs) -> anyhow::Result<chartreel::Animation> {
    let (table, config) = load(input)?;
    Ok(chartreel::Animation::new(&table, config)?)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut anim = animation(&args.input)?;
    let stats = anim
        .save(&args.out)
        .with_context(|| format!("render '{}'", args.out.display()))?;
    tracing::info!(
        frames = stats.frames_rendered,
        duration_ms = stats.duration_ms,
        "render finished"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut anim = animation(&args.input)?;
    let frame = anim.render_frame(args.frame)?;
    chartreel::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_html(args: HtmlArgs) -> anyhow::Result<()> {
    let mut anim = animation(&args.input)?;
    let video = anim.to_html5_video()?;
    write_text(&args.out, &video.to_html())?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InputArgs) -> anyhow::Result<()> {
    let (table, config) = load(&args)?;
    let chart = chartreel::Chart::new(&table, config)?;
    let json = serde_json::to_string_pretty(&chart.table().to_json())?;
    println!("{json}");
    Ok(())
}

fn write_text(path: &Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}
