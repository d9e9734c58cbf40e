//! File-based declaration discovery for CLI use
//!
//! Finds `quetzal.toml` (or a `quetzal` field in `package.json`), loads it and
//! records its absolute location so relative paths resolve against it.

use std::fs;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Json, Toml};
use serde_json::Value;
use tracing::debug;

use crate::declaration::BundleDeclaration;
use crate::error::{ConfigError, Result};

pub const CONFIG_FILE: &str = "quetzal.toml";
pub const PACKAGE_JSON_FIELD: &str = "quetzal";

/// File-based declaration discovery
///
/// # Example
///
/// ```no_run
/// use quetzal_config::{ConfigDiscovery, ConfigResolver};
///
/// let declaration = ConfigDiscovery::new("assets").load().unwrap();
/// let config = ConfigResolver::new().resolve(&declaration).unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    /// Create a new discovery rooted at a directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. `quetzal.toml`
    /// 2. `package.json` with a non-null `quetzal` field
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get(PACKAGE_JSON_FIELD)
            .is_some_and(|field| !field.is_null())
            .then_some(pkg_path)
    }

    /// Load the discovered declaration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<BundleDeclaration> {
        let path = self.find().ok_or(ConfigError::NotFound)?;
        Self::load_from(&path)
    }

    /// Load a declaration from a specific file
    pub fn load_from(path: &Path) -> Result<BundleDeclaration> {
        let origin = Self::locate(path)?;
        Self::extract(Self::figment(&origin), &origin)
    }

    /// Absolute, canonical location of a config file
    pub fn locate(path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).map_err(|err| ConfigError::Load {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Provider chain for a config file, ready for further merges
    pub fn figment(origin: &Path) -> Figment {
        if origin.file_name().is_some_and(|name| name == "package.json") {
            Figment::from(Json::file(origin)).focus(PACKAGE_JSON_FIELD)
        } else {
            Figment::from(Toml::file(origin))
        }
    }

    /// Extract a declaration and stamp it with its origin
    pub fn extract(figment: Figment, origin: &Path) -> Result<BundleDeclaration> {
        debug!(origin = %origin.display(), "loading bundle declaration");
        let declaration: BundleDeclaration =
            figment.extract().map_err(|err| ConfigError::Load {
                path: origin.to_path_buf(),
                message: err.to_string(),
            })?;
        Ok(declaration.with_origin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn find_returns_none_when_no_config() {
        let dir = TempDir::new().unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn find_ignores_package_json_without_field() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();
        assert!(ConfigDiscovery::new(dir.path()).find().is_none());
    }

    #[test]
    fn load_returns_not_found_when_no_config() {
        let dir = TempDir::new().unwrap();
        let result = ConfigDiscovery::new(dir.path()).load();
        assert!(matches!(result.unwrap_err(), ConfigError::NotFound));
    }

    #[test]
    fn load_records_absolute_origin() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
entry = "./js/app.js"
"#,
        )
        .unwrap();

        let declaration = ConfigDiscovery::new(dir.path()).load().unwrap();
        let origin = declaration.origin.unwrap();
        assert!(origin.is_absolute());
        assert!(origin.ends_with(CONFIG_FILE));
        assert_eq!(declaration.entry, "./js/app.js");
    }
}
