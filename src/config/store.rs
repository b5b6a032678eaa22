//! Key-value preference storage
//!
//! The client persists a single string preference (the server address).
//! Stores are injected so the rest of the crate never touches a global.
//! Location of the file-backed store: ~/.cschat/preferences.toml

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::errors::{ChatError, Result};

/// String-keyed preference storage
pub trait KeyValueStore {
    /// Read a value, falling back to `default` when the key is absent
    fn get_string(&self, key: &str, default: &str) -> String;

    /// Write a value
    fn put_string(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-process store, nothing is persisted
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat string table persisted as TOML
///
/// The whole table is rewritten on every put.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlFileStore {
    /// Open the store at the standard location
    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// Open a store at `path`; a missing file reads as empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Get the standard preferences file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ChatError::StoreError("Could not determine home directory".to_string()))?;

        Ok(home.join(".cschat").join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.values)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, contents)?;

        Ok(())
    }
}

impl KeyValueStore for TomlFileStore {
    fn get_string(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}
