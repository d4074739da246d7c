//! Key-value store backed by a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use strictly_slider::{KeyValueStore, StoreError};
use tracing::{debug, instrument};

/// Flat JSON object of string keys to string values.
///
/// Every write rewrites the whole file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store over `path`. The file is created on first write.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::new(format!("Failed to read '{}': {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::new(format!("Failed to parse '{}': {}", self.path.display(), e))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&values)
            .map_err(|e| StoreError::new(format!("Failed to encode store: {}", e)))?;
        std::fs::write(&self.path, json).map_err(|e| {
            StoreError::new(format!("Failed to write '{}': {}", self.path.display(), e))
        })?;

        debug!(key, "Value stored");
        Ok(())
    }
}
