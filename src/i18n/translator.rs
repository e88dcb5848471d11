//! Translator: configuration, locale resolution and catalog loading
//!
//! A [`Translator`] is built by the application, configured once, and then
//! either queried directly or attached to a host framework. Catalogs are
//! never cached: every load re-reads and re-flattens the resource.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde_json::Value;
use tracing::{debug, info};
use crate::config::I18nOptions;
use crate::utils::errors::{I18nError, Result};
use crate::utils::logging::log_catalog_load;
use super::catalog::Catalog;
use super::loader::{resolve_resource, resource_exists, with_suffix, CatalogExtension, CatalogSource, FsLoader};
use super::lookup::{Lookup, LookupFlavor, SharedRng, Translation};
use super::template::Context;

/// Locale used when neither the turn nor the options name one
pub const DEFAULT_LOCALE: &str = "en-US";

/// Options after defaults have been applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub directory: PathBuf,
    pub default_file: PathBuf,
    /// Only an explicitly configured default file overrides locale catalogs
    pub default_file_explicit: bool,
    pub default_locale: String,
    pub default_extension: Option<String>,
}

impl ResolvedOptions {
    fn from_options(options: I18nOptions, project_root: &Path) -> Self {
        let locales_dir = project_root.join("src").join("locales");
        let default_file_explicit = options.default_file.is_some();

        Self {
            default_file: options
                .default_file
                .unwrap_or_else(|| locales_dir.join("index.json")),
            directory: options.directory.unwrap_or(locales_dir),
            default_file_explicit,
            default_locale: options
                .default_locale
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            default_extension: options.default_extension,
        }
    }
}

/// Locale catalog translator
#[derive(Clone)]
pub struct Translator {
    source: Arc<dyn CatalogSource>,
    rng: SharedRng,
    project_root: PathBuf,
    options: Option<Arc<ResolvedOptions>>,
}

impl Translator {
    /// Create an unconfigured translator reading through `source`
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let rng: Box<dyn RngCore + Send> = Box::new(StdRng::from_entropy());

        Self {
            source,
            rng: Arc::new(Mutex::new(rng)),
            project_root,
            options: None,
        }
    }

    /// Create a translator reading catalogs from the file system
    pub fn from_fs() -> Self {
        Self::new(Arc::new(FsLoader::new()))
    }

    /// Replace the random source used to pick variants
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        let rng: Box<dyn RngCore + Send> = Box::new(rng);
        self.rng = Arc::new(Mutex::new(rng));
        self
    }

    /// Root that default directory and default file are resolved against
    ///
    /// Only affects a later `configure`.
    pub fn with_project_root(mut self, project_root: impl Into<PathBuf>) -> Self {
        self.project_root = project_root.into();
        self
    }

    /// Validate and store options, replacing any earlier configuration
    pub fn configure(&mut self, options: I18nOptions) -> Result<&mut Self> {
        if let Some(ref directory) = options.directory {
            if !resource_exists(self.source.as_ref(), directory) {
                return Err(I18nError::Config(format!(
                    "directory \"{}\" does not exist.",
                    directory.display()
                )));
            }
        }

        if let Some(ref default_file) = options.default_file {
            if !resource_exists(self.source.as_ref(), default_file) {
                return Err(I18nError::Config(format!(
                    "file \"{}\" does not exist.",
                    default_file.display()
                )));
            }
        }

        let resolved = ResolvedOptions::from_options(options, &self.project_root);
        info!(
            directory = %resolved.directory.display(),
            default_locale = %resolved.default_locale,
            default_file_override = resolved.default_file_explicit,
            "Translator configured"
        );
        self.options = Some(Arc::new(resolved));

        Ok(self)
    }

    pub fn is_configured(&self) -> bool {
        self.options.is_some()
    }

    /// Current options, or the defaults when `configure` was never called
    pub fn options(&self) -> Arc<ResolvedOptions> {
        match self.options {
            Some(ref options) => Arc::clone(options),
            None => Arc::new(ResolvedOptions::from_options(I18nOptions::default(), &self.project_root)),
        }
    }

    /// Lowercased locale tag for a turn's requested locale
    pub fn resolve_locale(&self, requested: Option<&str>) -> Result<String> {
        let options = self.options();
        let locale = requested
            .filter(|locale| !locale.is_empty())
            .unwrap_or(options.default_locale.as_str());

        if locale.trim().is_empty() {
            return Err(I18nError::InvalidLocale(locale.to_string()));
        }

        let locale = locale.to_lowercase();
        debug!(requested = ?requested, locale = %locale, "Resolved locale");
        Ok(locale)
    }

    /// Path of the catalog resource a requested locale reads
    ///
    /// An explicitly configured default file wins over the locale catalog for
    /// every locale.
    pub fn catalog_path(&self, requested: Option<&str>) -> Result<PathBuf> {
        let locale = self.resolve_locale(requested)?;
        self.locale_catalog_path(&locale)
    }

    fn locale_catalog_path(&self, locale: &str) -> Result<PathBuf> {
        let options = self.options();
        let mut file = options.directory.join(locale);

        if let Some(ref extension) = options.default_extension {
            let extension: CatalogExtension = extension.parse()?;
            file = with_suffix(&file, extension);
        }

        if options.default_file_explicit && resource_exists(self.source.as_ref(), &options.default_file) {
            file = options.default_file.clone();
        }

        resolve_resource(self.source.as_ref(), &file)
            .ok_or(I18nError::CatalogNotFound { path: file })
    }

    /// Load and flatten the catalog for a requested locale
    pub fn load_catalog(&self, requested: Option<&str>) -> Result<Catalog> {
        let locale = self.resolve_locale(requested)?;
        self.load_locale_catalog(requested, &locale)
    }

    fn load_locale_catalog(&self, requested: Option<&str>, locale: &str) -> Result<Catalog> {
        let path = self.locale_catalog_path(locale)?;
        let catalog = match self.source.load(&path)? {
            Value::Object(root) => Catalog::from_map(&root),
            other => {
                return Err(I18nError::InvalidCatalog {
                    path,
                    reason: format!("expected an object at the root, found {}", json_kind(&other)),
                })
            }
        };

        log_catalog_load(requested, &path, catalog.len());
        Ok(catalog)
    }

    /// Load a catalog and bind it as a lookup of the given flavor
    pub fn bind(&self, requested: Option<&str>, flavor: LookupFlavor) -> Result<Lookup> {
        let locale = self.resolve_locale(requested)?;
        let catalog = Arc::new(self.load_locale_catalog(requested, &locale)?);
        Ok(Lookup::new(locale, catalog, Arc::clone(&self.rng), flavor))
    }

    /// Load once and bind every flavor over the same catalog
    pub fn bind_all(&self, requested: Option<&str>) -> Result<Vec<Lookup>> {
        let full = self.bind(requested, LookupFlavor::Full)?;
        Ok(LookupFlavor::ALL
            .iter()
            .map(|flavor| full.with_flavor(*flavor))
            .collect())
    }

    /// One-shot lookup that reloads the catalog on every call
    pub fn translate(&self, requested: Option<&str>, key: &str, context: &Context) -> Result<Translation> {
        self.bind(requested, LookupFlavor::Full)?.call(key, context)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("project_root", &self.project_root)
            .field("options", &self.options)
            .finish()
    }
}
