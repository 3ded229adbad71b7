//! editais-monitor — one polling pass over the configured sources.
//!
//! Reads settings from the environment (and `.env`), checks every source,
//! saves state and sends one summary message. Meant to be run from cron or a
//! scheduled CI job.

use anyhow::{Context, Result};
use editais_monitor::config::{load_sources, MonitorConfig};
use editais_monitor::Monitor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Compact logs by default; `MONITOR_LOG_JSON=1` switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("editais_monitor=info,warn"));

    let json = std::env::var("MONITOR_LOG_JSON")
        .ok()
        .is_some_and(|v| v == "1");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().compact()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env when present; no-op otherwise.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = MonitorConfig::from_env().context("invalid configuration")?;
    let sources = load_sources(&cfg.sources_path)?;
    tracing::info!(
        sources = sources.len(),
        state = %cfg.state_path.display(),
        dry_run = cfg.dry_run,
        "starting run"
    );

    let monitor = Monitor::from_config(&cfg, sources)?;
    let summary = monitor.run_once(chrono::Utc::now()).await?;

    tracing::info!(
        reported = summary.items.len(),
        expired = summary.expired_skipped,
        unchanged = summary.sources_unchanged,
        failed = summary.sources_failed,
        "done"
    );
    Ok(())
}
