//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for translator events.

use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::{ErrorSeverity, I18nError, Result};

/// Initialize logging based on configuration
///
/// Keep the returned guard alive for as long as file logging should flush.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match config.file_path {
        Some(ref dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "convo-i18n.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(file_layer)
        .try_init()
        .map_err(|e| I18nError::Config(format!("Failed to initialize logging: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a catalog load
pub fn log_catalog_load(requested_locale: Option<&str>, path: &Path, key_count: usize) {
    debug!(
        requested_locale = requested_locale,
        path = %path.display(),
        key_count = key_count,
        "Catalog loaded"
    );
}

/// Log a failed lookup at a level matching the error's severity
pub fn log_lookup_failure(locale: &str, key: &str, err: &I18nError) {
    let recoverable = err.is_recoverable();
    match err.severity() {
        ErrorSeverity::Warning => {
            warn!(locale = locale, key = key, recoverable = recoverable, error = %err, "Lookup failed");
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            error!(locale = locale, key = key, recoverable = recoverable, error = %err, "Lookup failed");
        }
    }
}
