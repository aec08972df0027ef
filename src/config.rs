//! Configuration
//!
//! Environment-driven settings for the command-line front end.

use std::path::PathBuf;

use crate::visitors::store::JsonFileStore;

/// Default store directory.
pub const DEFAULT_STORE_DIR: &str = ".";

/// Default store name.
pub const DEFAULT_STORE_NAME: &str = "visitors";

/// Crystal ID configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrystalConfig {
    /// Directory holding store documents.
    pub store_dir: PathBuf,
    /// Application-level store name; the document lives at `<dir>/<name>.json`.
    pub store_name: String,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}

impl CrystalConfig {
    /// Create config from environment variables.
    ///
    /// - `CRYSTAL_STORE_DIR`: store directory (default `.`)
    /// - `CRYSTAL_STORE_NAME`: store name (default `visitors`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            store_dir: get("CRYSTAL_STORE_DIR").map(PathBuf::from).unwrap_or(defaults.store_dir),
            store_name: get("CRYSTAL_STORE_NAME").unwrap_or(defaults.store_name),
        }
    }

    /// Path of the store document.
    pub fn store_path(&self) -> PathBuf {
        self.store_dir.join(format!("{}.json", self.store_name))
    }

    /// Open the configured file store.
    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.store_dir, self.store_name.clone())
    }
}

// =============================================================================
// TESTS
// =============================================================================
