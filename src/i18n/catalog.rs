//! Flattened translation catalogs
//!
//! A catalog maps dotted keys such as `menu.help.title` to a classified
//! [`TranslationEntry`]. Nested objects in the source are flattened; arrays
//! and scalars are stored under their key as they are, next to the raw JSON
//! they were classified from.

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An utterance with a display text and/or a spoken form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
}

/// One catalog value, classified by shape
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationEntry {
    /// A single template string
    Text(String),
    /// An all-string array, returned verbatim
    Suggestions(Vec<String>),
    /// An array with non-string elements; one is picked per lookup
    Variants(Vec<TranslationEntry>),
    /// An object carrying `text` and/or `speech`
    Structured(Utterance),
    /// Any other object
    Malformed(Value),
    /// Number, boolean or null
    Scalar(Value),
}

impl TranslationEntry {
    /// Classify a raw catalog value
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => TranslationEntry::Text(text),
            Value::Array(items) if items.iter().all(Value::is_string) => {
                TranslationEntry::Suggestions(
                    items
                        .into_iter()
                        .filter_map(|item| match item {
                            Value::String(s) => Some(s),
                            _ => None,
                        })
                        .collect(),
                )
            }
            Value::Array(items) => {
                TranslationEntry::Variants(items.into_iter().map(Self::from_value).collect())
            }
            Value::Object(map) => Self::from_object(map),
            scalar => TranslationEntry::Scalar(scalar),
        }
    }

    fn from_object(map: Map<String, Value>) -> Self {
        let field = |name: &str| -> Option<Option<String>> {
            match map.get(name) {
                None => Some(None),
                Some(Value::String(s)) => Some(Some(s.clone())),
                Some(_) => None,
            }
        };

        match (field("text"), field("speech")) {
            (Some(text), Some(speech)) if text.is_some() || speech.is_some() => {
                TranslationEntry::Structured(Utterance { text, speech })
            }
            _ => TranslationEntry::Malformed(Value::Object(map)),
        }
    }
}

/// Flatten nested objects into dotted keys
///
/// Arrays, scalars and nulls are leaves. Empty nested objects produce no keys.
pub fn flatten(source: &Map<String, Value>) -> BTreeMap<String, Value> {
    let mut flat = BTreeMap::new();
    flatten_into(&mut flat, None, source);
    flat
}

fn flatten_into(flat: &mut BTreeMap<String, Value>, prefix: Option<&str>, source: &Map<String, Value>) {
    for (key, value) in source {
        let full_key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };

        match value {
            Value::Object(nested) => flatten_into(flat, Some(&full_key), nested),
            leaf => {
                flat.insert(full_key, leaf.clone());
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct StoredEntry {
    raw: Value,
    entry: TranslationEntry,
}

/// Flattened key to entry mapping for one locale
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: BTreeMap<String, StoredEntry>,
}

impl Catalog {
    /// Flatten and classify a catalog root object
    pub fn from_map(source: &Map<String, Value>) -> Self {
        let entries = flatten(source)
            .into_iter()
            .map(|(key, raw)| {
                let entry = TranslationEntry::from_value(raw.clone());
                (key, StoredEntry { raw, entry })
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&TranslationEntry> {
        self.entries.get(key).map(|stored| &stored.entry)
    }

    /// The JSON value stored under `key`, exactly as the catalog file had it
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|stored| &stored.raw)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
