mod config;
mod prefs;
mod replay;
mod source;

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use viewer::engine::EngineCore;
use viewer::font::{Font, Glyph};
use viewer::geometry::Point;
use viewer::input::InputMode;
use viewer::load::{self, LoadError};
use viewer::pacing::FramePacer;
use viewer::preview;

use crate::config::{ConfigError, ViewerConfig};
use crate::prefs::{Prefs, PrefsError};
use crate::source::{FontSource, SourceError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Source(#[from] SourceError),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("font load failed: {0}")]
    Load(#[from] LoadError),
    #[error("prefs error: {0}")]
    Prefs(#[from] PrefsError),
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pilview", about = "Inspect and edit PIL bitmap font metrics")]
struct Cli {
    /// Treat wheel input as a trackpad (overrides saved prefs).
    #[arg(long, global = true, env = "PILVIEW_TRACKPAD", value_parser = BoolishValueParser::new())]
    trackpad: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarise a font.
    Info(FontArgs),
    /// List glyphs with their metrics.
    Glyphs(GlyphsArgs),
    /// Lay out a line of text with the font's metrics.
    Preview(PreviewArgs),
    /// Feed a scripted input session through the viewer.
    Replay(ReplayArgs),
    /// Show or change saved preferences.
    Prefs(PrefsArgs),
}

#[derive(Args, Debug)]
struct FontArgs {
    /// The `.pil` file, optionally followed by its atlas image.
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct GlyphsArgs {
    #[command(flatten)]
    font: FontArgs,

    /// Include glyphs with an empty source box.
    #[arg(long, default_value_t = false)]
    all: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    font: FontArgs,

    #[arg(long)]
    text: String,

    #[arg(long, default_value_t = 0.0)]
    x: f64,

    #[arg(long, default_value_t = 0.0)]
    y: f64,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    #[command(flatten)]
    font: FontArgs,

    /// JSON event script.
    #[arg(long)]
    script: PathBuf,

    /// Space frame events in real time at the configured frame rate.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

#[derive(Args, Debug)]
struct PrefsArgs {
    #[arg(long)]
    set_trackpad: Option<bool>,

    #[arg(long)]
    set_skip_open_notice: Option<bool>,
}

#[derive(Serialize)]
struct GlyphRow {
    label: String,
    #[serde(flatten)]
    glyph: Glyph,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ViewerConfig::from_env()?;
    let prefs = Prefs::load(&config.prefs_path);

    match cli.command {
        Command::Info(args) => run_info(args).await,
        Command::Glyphs(args) => run_glyphs(args).await,
        Command::Preview(args) => run_preview(args).await,
        Command::Replay(args) => {
            let mode = resolve_mode(cli.trackpad, config.trackpad, &prefs);
            run_replay(&config, mode, args).await
        }
        Command::Prefs(args) => run_prefs(&config, prefs, args),
    }
}

/// `--trackpad` forces trackpad mode. Otherwise `PILVIEW_TRACKPAD` decides
/// when set, then the saved preference.
fn resolve_mode(flag: bool, env: Option<bool>, prefs: &Prefs) -> InputMode {
    match (flag, env) {
        (true, _) => InputMode::Trackpad,
        (false, Some(trackpad)) => InputMode::from_trackpad_flag(trackpad),
        (false, None) => prefs.input_mode(),
    }
}

async fn open_font(args: &FontArgs) -> Result<(FontSource, Font), CliError> {
    let source = source::pair(&args.files)?;
    let bytes = tokio::fs::read(&source.metrics)
        .await
        .map_err(|e| CliError::Read { path: source.metrics.clone(), source: e })?;
    let font = load::submit(bytes).wait().await.inspect_err(|e| {
        tracing::warn!(path = %source.metrics.display(), error = %e, "font load failed");
    })?;
    tracing::info!(
        metrics = %source.metrics.display(),
        atlas = %source.atlas.display(),
        ysize = font.ysize,
        "font opened"
    );
    Ok((source, font))
}

async fn run_info(args: FontArgs) -> Result<(), CliError> {
    let (source, font) = open_font(&args).await?;
    print_json(&serde_json::json!({
        "metrics": source.metrics,
        "atlas": source.atlas,
        "ysize": font.ysize,
        "glyphs": font.glyphs().len(),
        "drawable": font.drawable_count(),
    }))
}

async fn run_glyphs(args: GlyphsArgs) -> Result<(), CliError> {
    let (_, font) = open_font(&args.font).await?;
    let rows: Vec<GlyphRow> = font
        .glyphs()
        .iter()
        .filter(|g| args.all || g.is_drawable())
        .map(|g| GlyphRow { label: g.label(), glyph: *g })
        .collect();
    print_json(&serde_json::to_value(rows)?)
}

async fn run_preview(args: PreviewArgs) -> Result<(), CliError> {
    let (_, font) = open_font(&args.font).await?;
    let layout = preview::layout(&font, args.text.as_bytes(), Point::new(args.x, args.y));
    let mut value = serde_json::to_value(&layout)?;
    if let (Value::Object(map), Some(bounds)) = (&mut value, layout.bounds()) {
        map.insert("bounds".to_owned(), serde_json::to_value(bounds)?);
    }
    print_json(&value)
}

async fn run_replay(config: &ViewerConfig, mode: InputMode, args: ReplayArgs) -> Result<(), CliError> {
    let (_, font) = open_font(&args.font).await?;
    let script = tokio::fs::read_to_string(&args.script)
        .await
        .map_err(|e| CliError::Read { path: args.script.clone(), source: e })?;
    let events = replay::parse_script(&script)?;

    #[allow(clippy::cast_precision_loss)]
    let mut engine = EngineCore::with_wheel_idle(config.wheel_idle_ms as f64);
    engine.set_input_mode(mode);
    engine.set_viewport(config.viewport.width, config.viewport.height);
    engine.install_font(font);
    let mut pacer = FramePacer::new(config.frame_rate);

    tracing::info!(events = events.len(), ?mode, realtime = args.realtime, "replaying");
    let report = if args.realtime {
        replay::run_paced(&mut engine, &mut pacer, &events).await
    } else {
        replay::run(&mut engine, &mut pacer, &events)
    };
    print_json(&serde_json::to_value(report)?)
}

fn run_prefs(config: &ViewerConfig, mut prefs: Prefs, args: PrefsArgs) -> Result<(), CliError> {
    let mut changed = false;
    if let Some(trackpad) = args.set_trackpad {
        prefs.trackpad_mode = trackpad;
        changed = true;
    }
    if let Some(skip) = args.set_skip_open_notice {
        prefs.skip_open_notice = skip;
        changed = true;
    }
    if changed {
        prefs.save(&config.prefs_path)?;
        tracing::info!(path = %config.prefs_path.display(), "prefs updated");
    }
    print_json(&serde_json::to_value(prefs)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
