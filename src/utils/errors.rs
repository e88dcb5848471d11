//! Error handling for convo-i18n
//!
//! This module defines the error type shared by configuration, catalog loading
//! and lookup, and provides a unified error handling strategy.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for convo-i18n
#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Locale is not valid. Found \"{0}\"")]
    InvalidLocale(String),

    #[error("Catalog file \"{}\" does not exist", .path.display())]
    CatalogNotFound { path: PathBuf },

    #[error("\"{key}\" was not found in locales [{}]", .known.join(", "))]
    MissingKey { key: String, known: Vec<String> },

    #[error("Invalid entry for \"{key}\": only 'text' and 'speech' values are allowed")]
    InvalidEntry { key: String },

    #[error("Invalid catalog \"{}\": {reason}", .path.display())]
    InvalidCatalog { path: PathBuf, reason: String },

    #[error("Failed to parse catalog \"{}\": {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convo-i18n operations
pub type Result<T> = std::result::Result<T, I18nError>;

impl I18nError {
    /// Check if the error is recoverable
    ///
    /// Recoverable errors depend on the request (the locale or key a turn asked
    /// for) or on transient I/O; the others mean the deployment itself is broken.
    pub fn is_recoverable(&self) -> bool {
        match self {
            I18nError::Config(_) => false,
            I18nError::InvalidLocale(_) => false,
            I18nError::CatalogNotFound { .. } => true,
            I18nError::MissingKey { .. } => true,
            I18nError::InvalidEntry { .. } => false,
            I18nError::InvalidCatalog { .. } => false,
            I18nError::Parse { .. } => false,
            I18nError::Settings(_) => false,
            I18nError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            I18nError::Config(_) => ErrorSeverity::Critical,
            I18nError::Settings(_) => ErrorSeverity::Critical,
            I18nError::InvalidLocale(_) => ErrorSeverity::Critical,
            I18nError::MissingKey { .. } => ErrorSeverity::Warning,
            I18nError::CatalogNotFound { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
