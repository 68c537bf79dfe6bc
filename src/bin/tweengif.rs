use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant, SystemTime},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tweengif", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a transition to an animated GIF.
    Render(RenderArgs),
    /// Render a single blended frame as a PNG.
    Frame(FrameArgs),
    /// Re-render a GIF whenever either input image changes.
    Watch(WatchArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Start image.
    #[arg(long)]
    start: PathBuf,

    /// End image.
    #[arg(long)]
    end: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    transition: TransitionArgs,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Start image.
    #[arg(long)]
    start: PathBuf,

    /// End image.
    #[arg(long)]
    end: PathBuf,

    /// Blend factor in [0, 1]; 0 is the start image.
    #[arg(long)]
    t: f32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Alignment policy.
    #[arg(long, value_enum, default_value_t = ModeChoice::CropToStart)]
    mode: ModeChoice,

    /// Resampling filter.
    #[arg(long, value_enum, default_value_t = FilterChoice::Triangle)]
    filter: FilterChoice,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    /// Start image.
    #[arg(long)]
    start: PathBuf,

    /// End image.
    #[arg(long)]
    end: PathBuf,

    /// Output GIF path, rewritten after every change.
    #[arg(long)]
    out: PathBuf,

    /// How often to check the inputs, in milliseconds.
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Exit once this many renders have finished.
    #[arg(long)]
    exit_after: Option<usize>,

    #[command(flatten)]
    transition: TransitionArgs,
}

/// Transition options; flags override values from `--config`.
#[derive(Args, Debug)]
struct TransitionArgs {
    /// Base configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transition length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Interpolated frames per second.
    #[arg(long)]
    framerate: Option<f64>,

    /// Alignment policy.
    #[arg(long, value_enum)]
    mode: Option<ModeChoice>,

    /// Resampling filter.
    #[arg(long, value_enum)]
    filter: Option<FilterChoice>,

    /// Quantization threads.
    #[arg(long)]
    workers: Option<usize>,

    /// Quantization quality, 1 (best) to 30 (fastest).
    #[arg(long)]
    quality: Option<u8>,

    /// Drop the interpolated frame at blend factor 1.
    #[arg(long)]
    no_final_blend: bool,

    /// Append a 1 ms copy of the end frame.
    #[arg(long)]
    tail_frame: bool,

    /// Blend frames in parallel.
    #[arg(long)]
    parallel: bool,
}

impl TransitionArgs {
    fn resolve(&self) -> anyhow::Result<tweengif::TransitionConfig> {
        let mut cfg = match &self.config {
            Some(path) => tweengif::TransitionConfig::from_path(path)?,
            None => tweengif::TransitionConfig::default(),
        };
        if let Some(v) = self.duration {
            cfg.duration_secs = v;
        }
        if let Some(v) = self.framerate {
            cfg.framerate = v;
        }
        if let Some(v) = self.mode {
            cfg.crop_mode = v.into();
        }
        if let Some(v) = self.filter {
            cfg.filter = v.into();
        }
        if let Some(v) = self.workers {
            cfg.encoder.workers = v;
        }
        if let Some(v) = self.quality {
            cfg.encoder.quality = v;
        }
        if self.no_final_blend {
            cfg.sequence.include_redundant_final_blend = false;
        }
        if self.tail_frame {
            cfg.sequence.include_tail_frame = true;
        }
        if self.parallel {
            cfg.sequence.parallel = true;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    CropToStart,
    CropToEnd,
    PadToStart,
    PadToEnd,
}

impl From<ModeChoice> for tweengif::CropMode {
    fn from(v: ModeChoice) -> Self {
        match v {
            ModeChoice::CropToStart => tweengif::CropMode::CropToStart,
            ModeChoice::CropToEnd => tweengif::CropMode::CropToEnd,
            ModeChoice::PadToStart => tweengif::CropMode::PadToStart,
            ModeChoice::PadToEnd => tweengif::CropMode::PadToEnd,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterChoice {
    Nearest,
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl From<FilterChoice> for tweengif::ResampleFilter {
    fn from(v: FilterChoice) -> Self {
        match v {
            FilterChoice::Nearest => tweengif::ResampleFilter::Nearest,
            FilterChoice::Triangle => tweengif::ResampleFilter::Triangle,
            FilterChoice::CatmullRom => tweengif::ResampleFilter::CatmullRom,
            FilterChoice::Lanczos3 => tweengif::ResampleFilter::Lanczos3,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Watch(args) => cmd_watch(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = args.transition.resolve()?;
    let settings = tweengif::GenerationSettings {
        start_image: Some(tweengif::load_image(&args.start)?),
        end_image: Some(tweengif::load_image(&args.end)?),
        ..cfg.settings()
    };

    let transition = match tweengif::render_transition(&settings, &cfg.render_opts())? {
        tweengif::RenderOutcome::Rendered(t) => t,
        tweengif::RenderOutcome::Skipped(missing) => anyhow::bail!("{missing} missing (bug)"),
    };

    let encoder = tweengif::GifEncoder::new(cfg.encoder)?;
    let gif = tweengif::spawn_encode(Arc::new(encoder), transition.size, transition.frames)?
        .wait()?;

    tweengif::ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, &gif.bytes)
        .with_context(|| format!("write gif '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({}, {} frames)",
        args.out.display(),
        gif.size,
        gif.frame_count
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !(0.0..=1.0).contains(&args.t) {
        anyhow::bail!("--t must be in [0, 1], got {}", args.t);
    }
    let start = tweengif::load_image(&args.start)?;
    let end = tweengif::load_image(&args.end)?;

    let mut canvas = tweengif::Canvas::new(args.filter.into());
    let placed = tweengif::place_frames(&start, &end, args.mode.into(), &mut canvas);
    let frame = tweengif::blend(&placed.start, &placed.end, args.t);

    tweengif::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let cfg = args.transition.resolve()?;
    let encoder = Arc::new(tweengif::GifEncoder::new(cfg.encoder)?);
    let mut session = tweengif::TransitionSession::new(
        cfg.render_opts(),
        cfg.debounce(),
        encoder,
        tweengif::FilePreview::new(&args.out),
    )
    .with_settings(cfg.settings());

    let mut start = WatchedFile::new(&args.start);
    let mut end = WatchedFile::new(&args.end);
    let interval = Duration::from_millis(args.poll_ms.max(1));
    let mut finished = 0usize;

    eprintln!(
        "watching {} and {}",
        args.start.display(),
        args.end.display()
    );
    loop {
        let now = Instant::now();
        if let Some(img) = start.poll_changed() {
            session.set_start_image(img, now);
        }
        if let Some(img) = end.poll_changed() {
            session.set_end_image(img, now);
        }

        let report = session.poll(now);
        match report.triggered {
            Some(tweengif::RenderTrigger::Started { size, frames }) => {
                tracing::info!(%size, frames, "render started");
            }
            Some(tweengif::RenderTrigger::Skipped(missing)) => {
                eprintln!("waiting for {missing}");
            }
            Some(tweengif::RenderTrigger::Failed(reason)) => {
                eprintln!("render failed: {reason}");
                finished += 1;
            }
            None => {}
        }
        if report.delivered > 0 {
            eprintln!("wrote {}", args.out.display());
        }
        finished += report.delivered + report.failed;

        if args.exit_after.is_some_and(|n| finished >= n) {
            break;
        }
        std::thread::sleep(interval);
    }

    session.flush();
    Ok(())
}

/// An input file reloaded whenever its modification time changes.
struct WatchedFile {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl WatchedFile {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            modified: None,
        }
    }

    fn poll_changed(&mut self) -> Option<tweengif::SourceImage> {
        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()?;
        if self.modified == Some(modified) {
            return None;
        }
        self.modified = Some(modified);

        match tweengif::load_image(&self.path) {
            Ok(img) => Some(img),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not load image");
                None
            }
        }
    }
}
