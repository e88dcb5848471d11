//! Placeholder substitution
//!
//! Placeholders look like `{name}`. Each context key replaces only the first
//! occurrence of its placeholder; there is no escape syntax for braces.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

/// Ordered placeholder values for one lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: Vec<(String, String)>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; a repeated key replaces the earlier value in place
    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Display) {
        let key = key.into();
        let value = value.to_string();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.values.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

/// Order follows the map's iteration order, which is arbitrary for `HashMap`
impl From<HashMap<String, String>> for Context {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BTreeMap<String, String>> for Context {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Replace the first `{key}` for every key in `context`, in insertion order
pub fn apply_context(text: &str, context: &Context) -> String {
    let mut result = text.to_string();
    for (key, value) in context.iter() {
        let placeholder = format!("{{{}}}", key);
        result = result.replacen(&placeholder, value, 1);
    }
    result
}
