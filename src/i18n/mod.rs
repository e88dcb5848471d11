//! Internationalization module
//!
//! This module resolves a user's locale to a flattened translation catalog,
//! looks keys up, picks random variants among alternative phrasings and fills
//! `{name}` placeholders.

pub mod catalog;
pub mod loader;
pub mod lookup;
pub mod template;
pub mod translator;

// Re-export commonly used i18n components
pub use catalog::{flatten, Catalog, TranslationEntry, Utterance};
pub use loader::{CatalogExtension, CatalogSource, FsLoader, MemoryLoader};
pub use lookup::{Lookup, LookupFlavor, SharedRng, Translation};
pub use template::{apply_context, Context};
pub use translator::{ResolvedOptions, Translator, DEFAULT_LOCALE};
