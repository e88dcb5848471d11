//! Test helpers module
//!
//! This module provides a fake host framework, catalog fixtures and
//! translator builders shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use convo_i18n::i18n::MemoryLoader;
use convo_i18n::middleware::{AppHost, Middleware, TurnContext};
use convo_i18n::{I18nOptions, Lookup, Result, Translator};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Turn of the fake framework, mirroring a conversation object
#[derive(Debug, Default)]
pub struct FakeTurn {
    pub locale: Option<String>,
    pub lookups: HashMap<&'static str, Lookup>,
}

impl TurnContext for FakeTurn {
    fn user_locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    fn install_lookup(&mut self, alias: &'static str, lookup: Lookup) {
        self.lookups.insert(alias, lookup);
    }
}

/// App object of the fake framework
#[derive(Default)]
pub struct FakeApp {
    pub middlewares: Vec<Middleware<FakeTurn>>,
    pub lookups: HashMap<&'static str, Lookup>,
}

impl FakeApp {
    /// Run all middlewares on a new turn for `locale`
    pub fn turn(&self, locale: Option<&str>) -> Result<FakeTurn> {
        let mut turn = FakeTurn {
            locale: locale.map(str::to_string),
            ..FakeTurn::default()
        };
        for middleware in &self.middlewares {
            middleware(&mut turn)?;
        }
        Ok(turn)
    }
}

impl AppHost for FakeApp {
    type Turn = FakeTurn;

    fn register_middleware(&mut self, middleware: Middleware<FakeTurn>) {
        self.middlewares.push(middleware);
    }

    fn install_lookup(&mut self, alias: &'static str, lookup: Lookup) {
        self.lookups.insert(alias, lookup);
    }
}

pub const LOCALES_DIR: &str = "/srv/bot/locales";

/// English catalog exercising every entry shape
pub fn english_catalog() -> Value {
    json!({
        "greeting": "Hello {name}!",
        "suggestions": ["Yes", "No", "Maybe"],
        "welcome": [
            { "text": "Hi {name}", "speech": "<speak>Hi {name}</speak>" },
            { "text": "Hey {name}", "speech": "<speak>Hey {name}</speak>" }
        ],
        "menu": {
            "help": { "title": "Help", "body": "Ask me about {topic}." },
            "limit": 10
        },
        "broken": [{ "title": "nope" }]
    })
}

pub fn french_catalog() -> Value {
    json!({
        "greeting": "Bonjour {name} !",
        "suggestions": ["Oui", "Non"]
    })
}

pub fn german_catalog() -> Value {
    json!({
        "greeting": "Hallo {name}!"
    })
}

/// Loader with en-us, fr-fr and de-de catalogs under [`LOCALES_DIR`]
pub fn memory_loader() -> MemoryLoader {
    MemoryLoader::new()
        .with_resource(format!("{}/en-us.json", LOCALES_DIR), english_catalog())
        .with_resource(format!("{}/fr-fr.json", LOCALES_DIR), french_catalog())
        .with_resource(format!("{}/de-de.json", LOCALES_DIR), german_catalog())
}

/// Seeded translator over [`memory_loader`], configured for [`LOCALES_DIR`]
pub fn memory_translator(seed: u64) -> Translator {
    let mut translator = Translator::new(Arc::new(memory_loader()))
        .with_project_root("/srv/bot")
        .with_rng(StdRng::seed_from_u64(seed));
    translator
        .configure(I18nOptions::default().with_directory(LOCALES_DIR))
        .expect("fixture directory exists");
    translator
}

/// Temporary catalog directory on disk
pub struct LocaleDir {
    pub temp_dir: TempDir,
}

impl LocaleDir {
    pub fn new() -> Self {
        Self {
            temp_dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` inside the directory
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write catalog");
        path
    }
}
