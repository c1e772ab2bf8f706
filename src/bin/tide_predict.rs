//! Command-line tide predictions.
//!
//! ```text
//! tide-predict --catalog puget_sound.json --station Seattle \
//!     --start 2024-06-01T00:00:00Z --end 2024-06-02T00:00:00Z --interval 6
//! ```
//!
//! Prints `time,height` CSV on stdout. Ambiguous station names are resolved
//! by prompting on stderr for a numbered choice.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use tide_rs::analysis::find_extrema;
use tide_rs::config::TideConfig;
use tide_rs::io::read_catalog_file;
use tide_rs::prediction::Predictor;
use tide_rs::resolve::{StationChooser, resolve_with};

/// Predict tide heights from harmonic constants
#[derive(Parser)]
#[command(name = "tide-predict")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Harmonic tide prediction", long_about = None)]
struct Cli {
    /// Catalog document (JSON); overrides the config file
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Station name, name fragment, or identifier
    #[arg(short, long)]
    station: String,

    /// First instant (RFC 3339, e.g. 2024-06-01T00:00:00Z)
    #[arg(long)]
    start: DateTime<Utc>,

    /// Last instant (RFC 3339)
    #[arg(long)]
    end: DateTime<Utc>,

    /// Sampling interval in minutes (1-60)
    #[arg(short, long)]
    interval: Option<u32>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Print high and low waters instead of every sample
    #[arg(long)]
    extrema: bool,
}

/// Asks on stderr and reads the answer from stdin.
struct PromptChooser;

impl StationChooser for PromptChooser {
    fn choose(&mut self, query: &str, candidates: &[&str]) -> Option<usize> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "Several stations match \"{query}\":").ok()?;
        for (i, name) in candidates.iter().enumerate() {
            writeln!(stderr, "  {}: {}", i + 1, name).ok()?;
        }
        write!(stderr, "Choose a station [1-{}]: ", candidates.len()).ok()?;
        stderr.flush().ok()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).ok()?;
        line.trim().parse().ok()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &cli.config {
        Some(path) => TideConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TideConfig::default(),
    };

    let Some(catalog_path) = cli.catalog.as_ref().or(config.catalog.as_ref()) else {
        bail!("no catalog given; pass --catalog or set `catalog` in the config file");
    };
    let catalog = read_catalog_file(catalog_path)
        .with_context(|| format!("failed to read catalog {}", catalog_path.display()))?;

    let station = match catalog.lookup(&cli.station) {
        Some(station) => station,
        None => resolve_with(&catalog, &cli.station, &mut PromptChooser)?,
    };

    let interval = cli.interval.unwrap_or(config.default_interval_minutes);
    let series = Predictor::with_config(&catalog, config.predictor)
        .predict_station(station, cli.start, cli.end, interval)
        .with_context(|| format!("prediction for {} failed", station.name))?;

    let mut out = std::io::stdout().lock();
    if cli.extrema {
        writeln!(out, "time,height,kind")?;
        for e in find_extrema(&series) {
            writeln!(out, "{},{:.4},{}", e.time.to_rfc3339(), e.height, e.kind)?;
        }
    } else {
        writeln!(out, "time,height")?;
        for p in &series {
            writeln!(out, "{},{:.4}", p.time.to_rfc3339(), p.height)?;
        }
    }
    out.flush()?;
    Ok(())
}
