//! File-based logging
//!
//! The TUI owns the terminal, so tracing output goes to a daily rotating file
//! in the user's cache directory instead of stdout.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const LOG_FILE_PREFIX: &str = "pms-rs";

/// `$XDG_CACHE_HOME/pms-rs`, or `.logs` when there is no cache directory.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("pms-rs"))
        .unwrap_or_else(|| PathBuf::from(".logs"))
}

/// Initialize the logging system.
///
/// Logs are written to `pms-rs.YYYY-MM-DD` in [`log_dir`]. The level can be
/// controlled via `RUST_LOG`; by default this crate logs at DEBUG and
/// everything else at WARN.
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    // Non-blocking so a slow disk never stalls the UI thread
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; it has to live as long as the process.
    Box::leak(Box::new(guard));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pms_rs=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "Logging initialized");

    Ok(())
}
