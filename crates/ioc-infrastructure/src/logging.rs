//! Structured logging with tracing
//!
//! Installs the global subscriber: an env-overridable filter, plain or JSON
//! stdout output and an optional daily-rolling file.

use crate::constants::{DEFAULT_LOG_FILE_EXTENSION, DEFAULT_LOG_FILE_STEM, LOG_FILTER_ENV};
use ioc_domain::error::{Error, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

// Re-export LoggingConfig for convenience
pub use crate::config::LoggingConfig;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the provided configuration
///
/// Fails when the level is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let rolling = file_appender(config)?;

    // Layer types differ between the JSON and plain branches
    let installed = if config.json_format {
        let stdout = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_names(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = rolling {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    } else {
        let stdout = fmt::layer().with_target(true).with_thread_names(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = rolling {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stdout).with(file).try_init()
        } else {
            registry.with(stdout).try_init()
        }
    };

    installed.map_err(|e| {
        Error::infrastructure_with_source("Failed to install the global tracing subscriber", e)
    })?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Build the daily-rolling file appender for `file_output`, if configured
///
/// `dir/app.log` rolls into `dir/app.<date>.log`; at most `max_files` of
/// those are kept.
pub fn file_appender(config: &LoggingConfig) -> Result<Option<RollingFileAppender>> {
    let Some(path) = config.file_output.as_ref() else {
        return Ok(None);
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let prefix = path
        .file_stem()
        .map_or_else(|| DEFAULT_LOG_FILE_STEM.into(), |stem| stem.to_string_lossy());
    let suffix = path
        .extension()
        .map_or_else(|| DEFAULT_LOG_FILE_EXTENSION.into(), |ext| ext.to_string_lossy());

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix.into_owned())
        .filename_suffix(suffix.into_owned())
        .max_log_files(config.max_files)
        .build(directory)
        .map(Some)
        .map_err(|e| {
            Error::io_with_source(format!("Failed to open log file {}", path.display()), e)
        })
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {}. Use trace, debug, info, warn, or error",
            level
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
