//! File logging setup.
//!
//! The TUI owns the terminal, so logs go to a daily-rotated file under
//! ${TITUL_HOME}/logs. Filtering via the TITUL_LOG env var (EnvFilter
//! syntax), default "info".

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Initializes tracing to a rotating log file.
///
/// The returned guard must be held for the lifetime of the process or
/// buffered log lines are dropped on exit.
pub fn init() -> Result<WorkerGuard> {
    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "titul.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("TITUL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
