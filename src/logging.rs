//! Tracing subscriber setup
//!
//! CLI runs log to stderr so stdout stays parseable. The TUI owns the
//! terminal, so it logs to `<cache_dir>/cinesearch/cinesearch.log` instead.
//! `RUST_LOG` overrides the configured level in both cases.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_NAME: &str = "cinesearch.log";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Directory holding the TUI log file
pub fn log_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("cinesearch"))
}

/// Log to stderr
pub fn init_cli(level: &str) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt_layer)
        .try_init();
}

/// Log to a file; keep the guard alive until exit so buffered lines flush
pub fn init_tui(level: &str) -> Result<WorkerGuard> {
    let dir = log_dir().context("Could not determine cache directory for log file")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let fmt_layer = fmt::layer().with_ansi(false).with_writer(writer);

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt_layer)
        .try_init();

    Ok(guard)
}
