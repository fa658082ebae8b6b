use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use hitsujun::{
    AnimationTiming, AssetLoader, Entry, FrameRGBA, ManualClock, PixelSize, Rgba8, StrokeViewer,
    SvgRasterizer, ViewState, ViewerConfig,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "hitsujun", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize dictionary records into canonical entries.
    Normalize(NormalizeArgs),
    /// List the strokes extracted for each entry.
    Strokes(StrokesArgs),
    /// Render the stroke-order diagram at one instant as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Input records JSON (array, collection or single record).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StrokesArgs {
    /// Input records JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset root containing `resources/kanji_svg/`.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TimingPreset {
    Diagram,
    Practice,
}

impl From<TimingPreset> for AnimationTiming {
    fn from(p: TimingPreset) -> Self {
        match p {
            TimingPreset::Diagram => AnimationTiming::DIAGRAM,
            TimingPreset::Practice => AnimationTiming::PRACTICE,
        }
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input records JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Asset root containing `resources/kanji_svg/`.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Character to render; defaults to the first entry.
    #[arg(long = "char")]
    chu: Option<String>,

    /// Milliseconds after `play`.
    #[arg(long)]
    at_ms: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Timing preset; overrides the config.
    #[arg(long, value_enum)]
    timing: Option<TimingPreset>,

    /// Output edge length in pixels; overrides the config.
    #[arg(long)]
    size: Option<u32>,

    /// Viewer config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Normalize(args) => cmd_normalize(args),
        Command::Strokes(args) => cmd_strokes(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn read_entries(path: &Path) -> anyhow::Result<Vec<Entry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read records '{}'", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parse records JSON '{}'", path.display()))?;
    Ok(hitsujun::normalize_all(&raw))
}

fn load_config(path: Option<&Path>, assets: Option<&Path>) -> anyhow::Result<ViewerConfig> {
    let mut cfg = match path {
        Some(p) => ViewerConfig::from_path(p)?,
        None => ViewerConfig::default(),
    };
    if let Some(root) = assets {
        cfg.asset_root = root.display().to_string();
    }
    Ok(cfg)
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let entries = read_entries(&args.in_path)?;
    let json = serde_json::to_string_pretty(&entries).context("serialize entries")?;
    match args.out {
        Some(out) => {
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {} entries to {}", entries.len(), out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_strokes(args: StrokesArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref(), args.assets.as_deref())?;
    let loader = AssetLoader::new(cfg.source()?).with_extractor(cfg.extractor());
    let entries = read_entries(&args.in_path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for entry in &entries {
        match loader.load_strokes(entry) {
            Ok(loaded) => {
                for s in &loaded.strokes {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{:.2}",
                        entry.chu,
                        s.index(),
                        s.id().unwrap_or("-"),
                        s.length()
                    )?;
                }
            }
            Err(e) => eprintln!("{}: {e}", entry.chu),
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref(), args.assets.as_deref())?;
    if let Some(t) = args.timing {
        cfg.timing = t.into();
    }
    if let Some(size) = args.size {
        cfg.diagram_size = size;
    }

    let entries = read_entries(&args.in_path)?;
    let entry = match args.chu.as_deref() {
        Some(c) => entries.into_iter().find(|e| e.chu == c),
        None => entries.into_iter().next(),
    }
    .context("no matching entry in input")?;

    let clock = Rc::new(ManualClock::new());
    let mut viewer = StrokeViewer::from_config(&cfg, cfg.source()?, Rc::clone(&clock))?;
    if let ViewState::Failed(msg) = viewer.load(entry) {
        anyhow::bail!("load diagram: {msg}");
    }
    viewer.play();
    clock.set(Duration::from_millis(args.at_ms));
    viewer.tick();
    let markup = viewer
        .render_markup()
        .context("diagram not loaded")?;

    let size = PixelSize::new(cfg.diagram_size, cfg.diagram_size)?;
    let diagram = SvgRasterizer::new().render(&markup, size)?;
    let mut frame = FrameRGBA::solid(size, Rgba8::rgb(255, 255, 255));
    frame.composite_over(&diagram)?;
    let img = frame.to_image()?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
