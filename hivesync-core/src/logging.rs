//! Logging infrastructure for hivesync
//!
//! Logs are written to `~/.local/state/hivesync/hivesync.log` following XDG standards.

use crate::config::{Config, LoggingConfig};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Initialize the logging system
///
/// Sets up tracing with:
/// - File output to XDG state directory
/// - Daily log rotation, keeping at most `max_files` rotated files
/// - Configurable log level via config or RUST_LOG env var
pub fn init(config: &LoggingConfig) -> crate::error::Result<LoggingGuard> {
    let log_dir = Config::state_dir();

    // Create log directory if it doesn't exist
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "hivesync.log");

    // Non-blocking writer so API calls never wait on log IO
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Build the filter from config or env var
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %config.level,
        "Logging initialized"
    );

    match prune_old_logs(&log_dir, config.max_files) {
        Ok(removed) if removed > 0 => {
            tracing::info!(removed, "Pruned rotated log files");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Failed to prune rotated log files");
        }
    }

    Ok(LoggingGuard { _guard: guard })
}

/// Remove rotated log files beyond the retention limit.
///
/// Daily rotation names files `hivesync.log.YYYY-MM-DD`, so lexical order is
/// chronological; the newest `max_files` are kept.
fn prune_old_logs(log_dir: &Path, max_files: usize) -> std::io::Result<usize> {
    let mut rotated: Vec<PathBuf> = std::fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with("hivesync.log."))
                .unwrap_or(false)
        })
        .collect();

    if rotated.len() <= max_files {
        return Ok(0);
    }

    rotated.sort();
    let excess = rotated.len() - max_files;
    let mut removed = 0;
    for path in rotated.iter().take(excess) {
        std::fs::remove_file(path)?;
        removed += 1;
    }
    Ok(removed)
}

/// Initialize logging for tests (logs to stdout)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Guard that keeps the logging system alive
///
/// When dropped, flushes any pending log writes.
pub struct LoggingGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Returns the log file path
pub fn log_file_path() -> PathBuf {
    Config::log_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let path = log_file_path();
        assert!(path.ends_with("hivesync.log"));
    }

    #[test]
    fn test_prune_keeps_newest_rotated_logs() {
        let dir = tempfile::tempdir().unwrap();
        for day in ["01", "02", "03", "04", "05"] {
            let name = format!("hivesync.log.2026-08-{}", day);
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::write(dir.path().join("unrelated.txt"), b"").unwrap();

        let removed = prune_old_logs(dir.path(), 3).unwrap();
        assert_eq!(removed, 2);

        assert!(!dir.path().join("hivesync.log.2026-08-01").exists());
        assert!(!dir.path().join("hivesync.log.2026-08-02").exists());
        assert!(dir.path().join("hivesync.log.2026-08-03").exists());
        assert!(dir.path().join("hivesync.log.2026-08-05").exists());
        assert!(dir.path().join("unrelated.txt").exists());
    }

    #[test]
    fn test_prune_is_a_noop_under_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hivesync.log.2026-08-01"), b"").unwrap();

        assert_eq!(prune_old_logs(dir.path(), 5).unwrap(), 0);
        assert!(dir.path().join("hivesync.log.2026-08-01").exists());
    }
}
