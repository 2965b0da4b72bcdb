//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.
//! - Console output (pretty in development, JSON in production)
//! - Optional daily rotating application logs under `<log_dir>/app`
//! - Rotated files older than [`LOG_RETENTION_DAYS`] are removed at startup

use std::fs;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

/// Rotated application logs are kept this many days
pub const LOG_RETENTION_DAYS: i64 = 14;

const APP_LOG_PREFIX: &str = "app";

/// `RUST_LOG` wins over the configured level when set
fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "larder_server=debug")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./larder-data/logs"))
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // Console layer
    if json_format {
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_thread_ids(true)
                .with_filter(level_filter(level))
                .boxed(),
        );
    } else {
        layers.push(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(level_filter(level))
                .boxed(),
        );
    }

    if let Some(dir) = log_dir {
        let app_log_dir = dir.join(APP_LOG_PREFIX);
        fs::create_dir_all(&app_log_dir)?;

        let app_log = RollingFileAppender::new(Rotation::DAILY, &app_log_dir, APP_LOG_PREFIX);
        layers.push(
            fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(app_log))
                .with_filter(level_filter(level))
                .boxed(),
        );
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    if let Some(dir) = log_dir
        && let Err(e) = cleanup_old_logs(dir)
    {
        tracing::warn!(error = %e, "Failed to clean up old log files");
    }

    Ok(())
}

/// Initialize console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Delete rotated application logs (`app.YYYY-MM-DD`) older than the retention window
///
/// Returns the number of files removed.
pub fn cleanup_old_logs(log_dir: &Path) -> anyhow::Result<usize> {
    let app_log_dir = log_dir.join(APP_LOG_PREFIX);
    if !app_log_dir.exists() {
        return Ok(0);
    }

    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(LOG_RETENTION_DAYS);
    let mut removed = 0;

    for entry in fs::read_dir(app_log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date_part) = name
            .strip_prefix(APP_LOG_PREFIX)
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            continue;
        };
        if let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}
