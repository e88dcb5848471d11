//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from a config file and environment variables.

use std::path::PathBuf;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub i18n: I18nOptions,
    pub logging: LoggingConfig,
    pub bot: BotConfig,
}

/// Translator options
///
/// Every field is optional; `Translator::configure` fills in the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nOptions {
    /// Directory holding one catalog per locale tag
    pub directory: Option<PathBuf>,
    /// Shared catalog used for every locale when set
    pub default_file: Option<PathBuf>,
    /// Locale used when a turn carries none
    pub default_locale: Option<String>,
    /// Suffix forced onto locale catalog paths, `js` or `json`
    pub default_extension: Option<String>,
}

impl I18nOptions {
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_default_file(mut self, default_file: impl Into<PathBuf>) -> Self {
        self.default_file = Some(default_file.into());
        self
    }

    pub fn with_default_locale(mut self, default_locale: impl Into<String>) -> Self {
        self.default_locale = Some(default_locale.into());
        self
    }

    pub fn with_default_extension(mut self, default_extension: impl Into<String>) -> Self {
        self.default_extension = Some(default_extension.into());
        self
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily-rolling log file; stdout only when unset
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

/// Telegram bot configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    pub token: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    ///
    /// Nested keys use `__` in the environment, e.g. `CONVO_I18N__I18N__DEFAULT_LOCALE`.
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("CONVO_I18N")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::I18nError> {
        super::validation::validate_settings(self)
    }
}
