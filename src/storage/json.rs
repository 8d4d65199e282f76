//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable key-value store backed by a
//! single JSON file. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(log n) - the whole map is loaded into memory once
//! - **Write**: O(n) - serializes and writes the entire map
//! - **Best for**: a few small values written on user interaction

use crate::domain::error::{BookhuntError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the store inside the plugin data directory.
pub const STORAGE_FILE_NAME: &str = "bookhunt.json";

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Stored values by key.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key-value store.
///
/// The entire map is kept in memory and persisted on every modification.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. The plugin owns exactly one instance
/// and is the only writer of the file.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "readingList": "[\"/works/OL45804W\",\"/works/OL27448W\"]"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, loaded on creation.
    data: StorageData,

    /// Tracks if data has been modified since last save.
    dirty: bool,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise creates a new empty storage.
    /// Parent directories are created automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use bookhunt::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/bookhunt.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            tracing::debug!(parent = ?parent, "creating parent directory");
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            tracing::debug!("loading existing data");
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    /// Opens the store, starting from an empty map if the file is unreadable.
    ///
    /// A corrupt file is left on disk untouched until the next successful write
    /// replaces it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the parent directory cannot be created.
    pub fn open_or_reset(file_path: PathBuf) -> Result<Self> {
        match Self::new(file_path.clone()) {
            Ok(storage) => Ok(storage),
            Err(e) => {
                tracing::warn!(path = ?file_path, error = %e, "storage file unreadable, starting empty");
                if let Some(parent) = file_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                Ok(Self {
                    file_path,
                    data: StorageData::default(),
                    dirty: false,
                })
            }
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| BookhuntError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            entries = data.entries.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Saves storage data to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the target path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - JSON serialization fails
    /// - Temporary file cannot be written
    /// - Rename operation fails
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        tracing::debug!(path = ?self.file_path, "saving storage data");

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| BookhuntError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!("storage saved successfully");
        Ok(())
    }
}

impl KeyValueStore for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("json_get", key = %key).entered();

        let value = self.data.entries.get(key).cloned();

        tracing::debug!(found = value.is_some(), "key lookup complete");
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set", key = %key, value_len = value.len()).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            tracing::trace!("value unchanged");
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    /// Flushes a pending write if the last save failed.
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty data on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_path(dir: &TempDir) -> PathBuf {
        dir.path().join("nested").join(STORAGE_FILE_NAME)
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);

        {
            let mut storage = JsonStorage::new(path.clone()).unwrap();
            storage.set("readingList", "[\"/works/OL1W\"]").unwrap();
        }

        let storage = JsonStorage::new(path).unwrap();
        assert_eq!(
            storage.get("readingList").unwrap().as_deref(),
            Some("[\"/works/OL1W\"]")
        );
        assert_eq!(storage.get("missing").unwrap(), None);
    }

    #[test]
    fn write_leaves_no_temporary_file() {
        let dir = TempDir::new().unwrap();
        let path = store_path(&dir);
        let mut storage = JsonStorage::new(path.clone()).unwrap();
        storage.set("k", "v").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn corrupt_file_is_rejected_by_new_and_reset_by_open_or_reset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonStorage::new(path.clone()),
            Err(BookhuntError::Storage(_))
        ));

        let mut storage = JsonStorage::open_or_reset(path.clone()).unwrap();
        assert_eq!(storage.get("readingList").unwrap(), None);
        storage.set("readingList", "[]").unwrap();

        let reopened = JsonStorage::new(path).unwrap();
        assert_eq!(reopened.get("readingList").unwrap().as_deref(), Some("[]"));
    }
}
