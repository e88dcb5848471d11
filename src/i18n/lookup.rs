//! Key lookup and variant resolution
//!
//! [`resolve`] turns a catalog entry into a [`Translation`]: suggestion lists
//! come back verbatim, variant lists are sampled, strings and utterances are
//! templated. [`Lookup`] binds a catalog, a random source and a flavor into
//! the callable that hosts install on turns.

use std::fmt;
use std::sync::{Arc, Mutex};
use rand::{Rng, RngCore};
use serde_json::Value;
use tracing::warn;
use crate::utils::errors::{I18nError, Result};
use super::catalog::{Catalog, TranslationEntry, Utterance};
use super::template::{apply_context, Context};

/// Random source shared by a translator and every lookup it binds
pub type SharedRng = Arc<Mutex<Box<dyn RngCore + Send>>>;

/// Result of a lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Text(String),
    Suggestions(Vec<String>),
    Utterance(Utterance),
    Value(Value),
}

impl Translation {
    /// The display text, if this result has one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Translation::Text(text) => Some(text),
            Translation::Utterance(utterance) => utterance.text.as_deref(),
            Translation::Value(Value::String(text)) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translation::Text(text) => f.write_str(text),
            Translation::Suggestions(items) => f.write_str(&items.join("\n")),
            Translation::Utterance(utterance) => {
                let shown = utterance.text.as_deref().or(utterance.speech.as_deref());
                f.write_str(shown.unwrap_or_default())
            }
            Translation::Value(value) => write!(f, "{}", value),
        }
    }
}

/// How a bound lookup post-processes entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupFlavor {
    /// Variant pick and templating, structured results kept whole
    Full,
    /// Like `Full`, but utterances with a `text` collapse to that text
    Raw,
    /// The stored entry as JSON, untouched
    All,
}

impl LookupFlavor {
    pub const ALL: [LookupFlavor; 3] = [LookupFlavor::Full, LookupFlavor::Raw, LookupFlavor::All];

    /// Names a host installs this flavor under
    pub fn aliases(&self) -> [&'static str; 2] {
        match self {
            LookupFlavor::Full => ["__", "i18n"],
            LookupFlavor::Raw => ["__raw", "i18nRaw"],
            LookupFlavor::All => ["__all", "i18nAll"],
        }
    }
}

fn missing_key(catalog: &Catalog, key: &str) -> I18nError {
    I18nError::MissingKey {
        key: key.to_string(),
        known: catalog.keys().map(str::to_string).collect(),
    }
}

fn template_utterance(utterance: &Utterance, context: &Context) -> Utterance {
    Utterance {
        text: utterance.text.as_deref().map(|text| apply_context(text, context)),
        speech: utterance.speech.as_deref().map(|speech| apply_context(speech, context)),
    }
}

/// Resolve `key` into a fully processed translation
pub fn resolve(catalog: &Catalog, key: &str, context: &Context, rng: &mut dyn RngCore) -> Result<Translation> {
    let entry = catalog.get(key).ok_or_else(|| missing_key(catalog, key))?;

    let entry = match entry {
        TranslationEntry::Suggestions(items) => return Ok(Translation::Suggestions(items.clone())),
        TranslationEntry::Variants(variants) if !variants.is_empty() => {
            let picked = &variants[rng.gen_range(0..variants.len())];
            if matches!(picked, TranslationEntry::Suggestions(_) | TranslationEntry::Variants(_)) {
                warn!(key = key, "Picked variant is a nested list");
                return Err(I18nError::InvalidEntry { key: key.to_string() });
            }
            picked
        }
        other => other,
    };

    match entry {
        TranslationEntry::Text(text) => Ok(Translation::Text(apply_context(text, context))),
        TranslationEntry::Structured(utterance) => {
            Ok(Translation::Utterance(template_utterance(utterance, context)))
        }
        TranslationEntry::Malformed(_) => {
            warn!(key = key, "Object entry without 'text' or 'speech'");
            Err(I18nError::InvalidEntry { key: key.to_string() })
        }
        TranslationEntry::Scalar(value) => Ok(Translation::Value(value.clone())),
        // Lists were returned or rejected above; an empty array classifies as suggestions
        TranslationEntry::Suggestions(_) | TranslationEntry::Variants(_) => {
            Err(I18nError::InvalidEntry { key: key.to_string() })
        }
    }
}

/// Resolve `key`, collapsing utterances to their display text
pub fn resolve_raw(catalog: &Catalog, key: &str, context: &Context, rng: &mut dyn RngCore) -> Result<Translation> {
    match resolve(catalog, key, context, rng)? {
        Translation::Utterance(Utterance { text: Some(text), .. }) => Ok(Translation::Text(text)),
        other => Ok(other),
    }
}

/// Return the stored entry as JSON with no processing
pub fn resolve_all(catalog: &Catalog, key: &str) -> Result<Translation> {
    catalog
        .raw(key)
        .map(|raw| Translation::Value(raw.clone()))
        .ok_or_else(|| missing_key(catalog, key))
}

/// A lookup bound to one locale's catalog
#[derive(Clone)]
pub struct Lookup {
    locale: String,
    catalog: Arc<Catalog>,
    rng: SharedRng,
    flavor: LookupFlavor,
}

impl Lookup {
    pub fn new(locale: impl Into<String>, catalog: Arc<Catalog>, rng: SharedRng, flavor: LookupFlavor) -> Self {
        Self {
            locale: locale.into(),
            catalog,
            rng,
            flavor,
        }
    }

    /// Look `key` up, applying `context` to template strings
    pub fn call(&self, key: &str, context: &Context) -> Result<Translation> {
        match self.flavor {
            LookupFlavor::All => resolve_all(&self.catalog, key),
            LookupFlavor::Full => {
                let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                resolve(&self.catalog, key, context, &mut **rng)
            }
            LookupFlavor::Raw => {
                let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                resolve_raw(&self.catalog, key, context, &mut **rng)
            }
        }
    }

    /// Shorthand for a lookup without placeholders
    pub fn get(&self, key: &str) -> Result<Translation> {
        self.call(key, &Context::new())
    }

    /// Same catalog and random source, different flavor
    pub fn with_flavor(&self, flavor: LookupFlavor) -> Self {
        Self {
            flavor,
            ..self.clone()
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn flavor(&self) -> LookupFlavor {
        self.flavor
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl fmt::Debug for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("locale", &self.locale)
            .field("flavor", &self.flavor)
            .field("keys", &self.catalog.len())
            .finish()
    }
}
