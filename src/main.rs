// Rank sheet extraction entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not the terminal)
// 2. Load config
// 3. Extract the requested sheet (PDF or CSV)
// 4. Optionally attach Sleeper player ids
// 5. Print the sheet as JSON on stdout

use std::path::Path;

use draft_tiers::config;
use draft_tiers::extract::{self, Extraction};
use draft_tiers::sleeper::{self, Lookup};

use anyhow::Context;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("tiers starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    if let Err(e) = std::fs::create_dir_all(&config.extract.uploads_dir) {
        warn!("could not create uploads dir {}: {e}", config.extract.uploads_dir);
    }

    // 3. Extract the requested sheet
    let path = std::env::args()
        .nth(1)
        .context("usage: tiers <sheet.pdf|sheet.csv>")?;
    let Extraction { mut sheet, stats } = extract::extract_from_path(Path::new(&path))?;
    info!(
        pages = stats.pages_seen,
        pages_skipped = stats.pages_skipped,
        lines = stats.lines_seen,
        lines_skipped = stats.lines_skipped,
        records = stats.records_parsed,
        "sheet processed"
    );

    // 4. Optionally attach Sleeper player ids
    let lookup = Lookup::from_config(&config)?;
    match &lookup {
        Lookup::Active(_) => info!("Sleeper id lookup enabled"),
        Lookup::Disabled => info!("Sleeper id lookup disabled"),
    }
    sleeper::attach_player_ids(&mut sheet, &lookup).await;

    // 5. Print the sheet as JSON
    let json = serde_json::to_string_pretty(&sheet).context("failed to serialize rank sheet")?;
    println!("{json}");

    Ok(())
}

/// Initialize tracing to log to a file (stdout carries the JSON result).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("tiers.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("draft_tiers=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
