use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use workshop_sign::{
    DEFAULT_LED_CELL, EmulatedBackend, JsonWorkshopFile, LogHandle, ManualTimeSource,
    MemoryBackend, SignApp, SignConfig, SystemTimeSource, save_led_preview,
};

#[derive(Parser, Debug)]
#[command(name = "workshop-sign", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drive the emulated panel in real time.
    Run(RunArgs),
    /// Render the sign headlessly up to a virtual time and save one preview PNG.
    Snapshot(SnapshotArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Config JSON; defaults are used when the file is missing.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Workshop list JSON, overriding the config.
    #[arg(long)]
    workshops: Option<PathBuf>,

    /// Virtual seconds per real second, overriding the config.
    #[arg(long)]
    timescale: Option<f64>,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Directory for periodic LED previews.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Write a preview every N frames.
    #[arg(long, default_value_t = 60)]
    snapshot_every: u64,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Virtual second to stop at.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Config JSON; defaults are used when the file is missing.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Workshop list JSON, overriding the config.
    #[arg(long)]
    workshops: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Snapshot(args) => cmd_snapshot(args),
    }
}

fn load_config(path: &Path, timescale: Option<f64>, log: &LogHandle) -> SignConfig {
    let mut cfg = match SignConfig::load(path, log) {
        Ok(cfg) => cfg,
        Err(err) => {
            log.in_scope(|| tracing::error!(error = %err, "bad config, using defaults"));
            SignConfig::default()
        }
    };
    if timescale.is_some() {
        cfg.timescale = timescale;
    }
    match cfg.validate() {
        Ok(cfg) => cfg,
        Err(err) => {
            log.in_scope(|| tracing::error!(error = %err, "invalid config, using defaults"));
            SignConfig::default()
        }
    }
}

fn workshops_path(cfg: &SignConfig, flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| cfg.with_defaults().workshops_path)
        .unwrap_or_default()
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let log = LogHandle::root();
    let cfg = load_config(&args.config, args.timescale, &log);
    let workshops = JsonWorkshopFile::new(workshops_path(&cfg, args.workshops), log.child("workshops"));

    let mut backend = EmulatedBackend::new(
        cfg.total_width(),
        cfg.total_height(),
        cfg.brightness_override.unwrap_or(1.0),
        log.child("backend"),
    );
    if let Some(dir) = args.snapshot_dir {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create snapshot dir '{}'", dir.display()))?;
        backend = backend.with_snapshots(dir, args.snapshot_every);
    }

    let mut app = SignApp::new(
        &cfg,
        SystemTimeSource::new(),
        backend,
        Box::new(workshops),
        log.clone(),
    )?;
    let frames = app.run(args.frames);
    log.in_scope(|| tracing::info!(frames, "stopped"));
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let log = LogHandle::root();
    let cfg = load_config(&args.config, None, &log);
    let workshops = JsonWorkshopFile::new(workshops_path(&cfg, args.workshops), log.child("workshops"));

    let time = ManualTimeSource::new(chrono::Local::now().naive_local());
    let backend = MemoryBackend::new(cfg.total_width(), cfg.total_height())
        .with_brightness_override(cfg.brightness_override.unwrap_or(1.0));
    let mut app = SignApp::new(&cfg, time.clone(), backend, Box::new(workshops), log.clone())?;
    let frames = app.run_until(&time, args.at.max(0.0))?;

    let frame = app
        .backend()
        .last_frame()
        .context("no frame was presented")?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    save_led_preview(frame, DEFAULT_LED_CELL, &args.out)?;

    eprintln!("wrote {} after {frames} frames", args.out.display());
    Ok(())
}
