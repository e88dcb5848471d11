//! Catalog resource loading
//!
//! Catalog files are reached through the [`CatalogSource`] trait so the
//! translator never touches the file system directly. [`FsLoader`] reads real
//! files, [`MemoryLoader`] serves catalogs held in memory.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::RwLock;
use serde_json::Value;
use tracing::debug;
use crate::utils::errors::{I18nError, Result};

/// Capability to check and load catalog resources by path
pub trait CatalogSource: Send + Sync {
    /// Whether a resource (file or directory) exists at exactly this path
    fn exists(&self, path: &Path) -> bool;

    /// Load the structured data stored at exactly this path
    fn load(&self, path: &Path) -> Result<Value>;
}

/// Recognised catalog file suffixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogExtension {
    Js,
    Json,
}

impl CatalogExtension {
    pub const ALL: [CatalogExtension; 2] = [CatalogExtension::Js, CatalogExtension::Json];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogExtension::Js => "js",
            CatalogExtension::Json => "json",
        }
    }
}

impl fmt::Display for CatalogExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogExtension {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "js" => Ok(CatalogExtension::Js),
            "json" => Ok(CatalogExtension::Json),
            other => Err(I18nError::Config(format!(
                "extension \"{}\" is not allowed. Only \"js\" and \"json\" files are allowed.",
                other
            ))),
        }
    }
}

/// Append `.ext` to a path without replacing an existing extension
///
/// Locale tags such as `en.us` would otherwise lose their last segment.
pub fn with_suffix(path: &Path, extension: CatalogExtension) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".");
    raw.push(extension.as_str());
    PathBuf::from(raw)
}

/// Find the first existing candidate among `path`, `path.js` and `path.json`
pub fn resolve_resource(source: &dyn CatalogSource, path: &Path) -> Option<PathBuf> {
    if source.exists(path) {
        return Some(path.to_path_buf());
    }

    CatalogExtension::ALL
        .iter()
        .map(|extension| with_suffix(path, *extension))
        .find(|candidate| source.exists(candidate))
}

/// Whether `path` exists bare or with one of the recognised suffixes
pub fn resource_exists(source: &dyn CatalogSource, path: &Path) -> bool {
    resolve_resource(source, path).is_some()
}

/// File system loader
///
/// Files hold JSON. A `.js` file may wrap its object as
/// `module.exports = {...};` or `export default {...};`.
#[derive(Debug, Clone, Default)]
pub struct FsLoader;

impl FsLoader {
    pub fn new() -> Self {
        Self
    }

    fn strip_module_wrapper(content: &str) -> &str {
        let trimmed = content.trim();
        let body = trimmed
            .strip_prefix("module.exports")
            .and_then(|rest| rest.trim_start().strip_prefix('='))
            .or_else(|| trimmed.strip_prefix("export default"))
            .unwrap_or(trimmed);

        body.trim().trim_end_matches(';').trim_end()
    }
}

impl CatalogSource for FsLoader {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn load(&self, path: &Path) -> Result<Value> {
        if path.is_dir() {
            return Err(I18nError::InvalidCatalog {
                path: path.to_path_buf(),
                reason: "path is a directory".to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let is_module = path.extension().map_or(false, |ext| ext == "js");
        let body = if is_module {
            Self::strip_module_wrapper(&content)
        } else {
            content.as_str()
        };

        debug!(path = %path.display(), bytes = content.len(), "Read catalog file");

        serde_json::from_str(body).map_err(|source| I18nError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// In-memory loader
///
/// Every ancestor of an inserted path counts as an existing directory, the
/// same way a catalog directory exists on disk once it holds a file.
#[derive(Debug, Default)]
pub struct MemoryLoader {
    resources: RwLock<HashMap<PathBuf, Value>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the resource at `path`
    pub fn insert(&self, path: impl Into<PathBuf>, value: Value) {
        let mut resources = self.resources.write().unwrap_or_else(|e| e.into_inner());
        resources.insert(path.into(), value);
    }

    /// Builder form of [`MemoryLoader::insert`]
    pub fn with_resource(self, path: impl Into<PathBuf>, value: Value) -> Self {
        self.insert(path, value);
        self
    }
}

impl CatalogSource for MemoryLoader {
    fn exists(&self, path: &Path) -> bool {
        let resources = self.resources.read().unwrap_or_else(|e| e.into_inner());
        resources.keys().any(|stored| stored.starts_with(path))
    }

    fn load(&self, path: &Path) -> Result<Value> {
        let resources = self.resources.read().unwrap_or_else(|e| e.into_inner());
        resources
            .get(path)
            .cloned()
            .ok_or_else(|| I18nError::CatalogNotFound { path: path.to_path_buf() })
    }
}
