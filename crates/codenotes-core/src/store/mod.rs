//! Key/value persistence used by the host.
//!
//! The store is installation-scoped: one value per key, replaced wholesale on
//! every write.

mod json_file;
mod snapshot;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::Result;

pub use json_file::JsonFileStore;
pub use snapshot::{append_note, load_snapshot, save_snapshot, CHECKLIST_KEY, NOTES_KEY};

/// Key/value storage operations provided by the host environment.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;

    /// Replace several values as one write.
    ///
    /// The default applies them one `set` at a time; stores that can commit
    /// a batch atomically override it.
    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// In-memory store, used by tests and ephemeral hosts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }

    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> Result<()> {
        (**self).set_many(entries)
    }
}
