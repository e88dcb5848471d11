//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to catch bad settings before the bot starts.

use crate::utils::errors::{I18nError, Result};
use crate::i18n::CatalogExtension;
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_i18n_options(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate translator options
///
/// Path existence is checked later by `Translator::configure`, which knows the
/// loader in use.
fn validate_i18n_options(options: &super::I18nOptions) -> Result<()> {
    if let Some(ref extension) = options.default_extension {
        extension.parse::<CatalogExtension>()?;
    }

    if let Some(ref locale) = options.default_locale {
        if locale.trim().is_empty() {
            return Err(I18nError::Config(
                "Default locale cannot be blank".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(I18nError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(I18nError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

/// Validate Telegram bot configuration
///
/// Only the bot binary needs a token, so this is not part of `validate_settings`.
pub fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(I18nError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}
