//! convo-i18n
//!
//! Localization for conversational apps: resolves a user's locale to a
//! flattened translation catalog, picks random variants among alternative
//! phrasings, fills `{name}` placeholders, and attaches lookups to each turn
//! and to the application object of a host bot framework.

pub mod config;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod utils;

// Re-export commonly used types
pub use config::{I18nOptions, Settings};
pub use utils::errors::{I18nError, Result};

// Re-export main components for easy access
pub use i18n::{Context, Lookup, LookupFlavor, Translation, Translator};
pub use middleware::{AppHost, TurnContext};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
