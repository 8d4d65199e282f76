//! In-memory storage backend.
//!
//! Nothing is written to disk. Used by tests and as the fallback when the data
//! directory cannot be opened, in which case bookmarks last for the session only.

use crate::domain::error::{BookhuntError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::BTreeMap;

/// Key-value store held in process memory.
///
/// `fail_writes` makes every [`set`](KeyValueStore::set) return an error so
/// callers can exercise their persistence failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one value.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries,
            fail_writes: false,
        }
    }

    /// Makes every subsequent write fail.
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(BookhuntError::Storage(format!("write rejected for key {key}")));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
