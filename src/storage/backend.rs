//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait that abstracts over the
//! persistence backend. The plugin stores a handful of string values under fixed
//! keys, so the trait mirrors a browser-style key-value store rather than a
//! record database.

use crate::domain::error::Result;
use std::fmt::Debug;

/// Abstraction over a persistent string key-value store.
///
/// Writes are synchronous: when [`set`](KeyValueStore::set) returns `Ok`, the
/// value is durable.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): In-process map for tests
///
/// # Examples
///
/// ```no_run
/// use bookhunt::storage::{JsonStorage, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/bookhunt.json"))?;
/// storage.set("readingList", "[]")?;
/// assert_eq!(storage.get("readingList")?.as_deref(), Some("[]"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait KeyValueStore: Send + Debug {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
