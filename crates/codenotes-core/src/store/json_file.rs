//! File-backed store: one JSON object holding every key.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::KeyValueStore;
use crate::{Error, Result};

/// Key/value store persisted as a single pretty-printed JSON file.
///
/// Writes go through a sibling temp file and a rename so a crash never leaves
/// a half-written store behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|error| {
                    Error::Store(format!(
                        "Failed to parse store at {}: {error}",
                        path.display()
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened store at {} ({} keys)", path.display(), values.len());
        Ok(Self { path, values })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let serialized = serde_json::to_string_pretty(&self.values)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, serialized)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    /// All entries land in a single file replacement. On a failed write the
    /// in-memory values roll back to what is on disk.
    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<()> {
        let previous = self.values.clone();
        for (key, value) in entries {
            self.values.insert(key.to_string(), value);
        }
        self.flush().inspect_err(|_| self.values = previous)
    }
}
