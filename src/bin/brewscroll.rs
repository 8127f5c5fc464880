use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "brewscroll", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame shown at one scroll progress as a PNG.
    Frame(FrameArgs),
    /// Render evenly spaced scroll progress values as numbered PNGs.
    Sweep(SweepArgs),
    /// Print overlay states at one scroll progress as JSON.
    Overlays(OverlaysArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Directory standing in for the site root (frames are read from `<dir>/frames/...`).
    #[arg(long)]
    site_root: PathBuf,

    /// Session config JSON; defaults to the stock 64-frame sequence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Order in which frame loads complete.
    #[arg(long, value_enum, default_value_t = OrderChoice::Sequential)]
    order: OrderChoice,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Scroll progress in [0, 1]; out-of-range values are clamped.
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Number of progress samples, including 0 and 1.
    #[arg(long, default_value_t = 9)]
    steps: u32,

    /// Output directory for `sweep_NNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct OverlaysArgs {
    /// Session config JSON; defaults to the stock overlays.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scroll progress in [0, 1].
    #[arg(long)]
    progress: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderChoice {
    Sequential,
    Reversed,
}

impl From<OrderChoice> for brewscroll::LoadOrder {
    fn from(choice: OrderChoice) -> Self {
        match choice {
            OrderChoice::Sequential => Self::Sequential,
            OrderChoice::Reversed => Self::Reversed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Overlays(args) => cmd_overlays(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<brewscroll::SessionConfig> {
    match path {
        Some(p) => Ok(brewscroll::SessionConfig::from_path(p)?),
        None => Ok(brewscroll::SessionConfig::default()),
    }
}

fn loaded_host(
    args: &SessionArgs,
) -> anyhow::Result<brewscroll::HeadlessHost<brewscroll::DirFrameSource>> {
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("viewport must be at least 1x1, got {}x{}", args.width, args.height);
    }
    let config = read_config(args.config.as_deref())?;
    let source = brewscroll::DirFrameSource::new(&args.site_root);
    let viewport = brewscroll::Viewport::new(args.width, args.height);
    let mut host = brewscroll::HeadlessHost::new(config, viewport, source)?;

    let status = host
        .load_all(args.order.into())
        .with_context(|| format!("load frames from '{}'", args.site_root.display()))?;
    let failed = host
        .session()
        .store()
        .iter()
        .filter(|f| f.state() == brewscroll::FrameState::Failed)
        .count();
    if failed > 0 {
        tracing::warn!(failed, total = status.total, "some frames failed to load");
    }
    Ok(host)
}

fn render_at(
    host: &mut brewscroll::HeadlessHost<brewscroll::DirFrameSource>,
    progress: f64,
) -> Option<brewscroll::RenderOutcome> {
    let outcome = host.seek(progress);
    if let Some(brewscroll::RenderOutcome::Skipped(reason)) = outcome {
        tracing::warn!(progress, ?reason, "frame not drawn; keeping previous content");
    }
    outcome
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut host = loaded_host(&args.session)?;
    render_at(&mut host, args.progress);

    let surface = host
        .surface()
        .context("session has no drawing surface")?;
    surface.save_png(&args.out)?;

    eprintln!(
        "wrote {} (frame {})",
        args.out.display(),
        host.session().current_frame()
    );
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    if args.steps < 2 {
        anyhow::bail!("--steps must be >= 2");
    }
    let mut host = loaded_host(&args.session)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    for k in 0..args.steps {
        let progress = f64::from(k) / f64::from(args.steps - 1);
        render_at(&mut host, progress);
        let out = args.out_dir.join(format!("sweep_{k:03}.png"));
        host.surface()
            .context("session has no drawing surface")?
            .save_png(&out)?;
        eprintln!(
            "wrote {} (progress {progress:.3}, frame {})",
            out.display(),
            host.session().current_frame()
        );
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct OverlayReport<'a> {
    content: &'a str,
    align: brewscroll::Align,
    opacity: f64,
    offset_y: f64,
}

#[derive(serde::Serialize)]
struct OverlaysOutput<'a> {
    progress: f64,
    frame: brewscroll::FrameIndex,
    overlays: Vec<OverlayReport<'a>>,
}

fn cmd_overlays(args: OverlaysArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let scheduler = config.overlay_scheduler()?;
    let progress = if args.progress.is_nan() {
        0.0
    } else {
        args.progress.clamp(0.0, 1.0)
    };

    let states = scheduler.evaluate(progress);
    let out = OverlaysOutput {
        progress,
        frame: brewscroll::FrameIndex::from_progress(progress, config.frame_count),
        overlays: scheduler
            .windows()
            .iter()
            .zip(states)
            .map(|(w, st)| OverlayReport {
                content: &w.content,
                align: st.align,
                opacity: st.opacity,
                offset_y: st.offset_y,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&out).context("serialize overlay states")?;
    println!("{json}");
    Ok(())
}
