//! Persistent reading-list bookmarks.
//!
//! The [`BookmarkStore`] owns the set of bookmarked work identifiers. It keeps
//! them in insertion order for display and writes the full list through to its
//! [`KeyValueStore`] on every mutation, under [`READING_LIST_KEY`] as a JSON
//! array of strings.

use crate::domain::error::{BookhuntError, Result};
use crate::storage::backend::KeyValueStore;

/// Key under which the reading list is persisted.
pub const READING_LIST_KEY: &str = "readingList";

/// Ordered set of bookmarked identifiers with write-through persistence.
///
/// # Examples
///
/// ```
/// use bookhunt::storage::{BookmarkStore, MemoryStorage};
///
/// let mut bookmarks = BookmarkStore::open(Box::new(MemoryStorage::new()));
/// assert!(bookmarks.toggle("/works/OL45804W")?);
/// assert!(bookmarks.contains("/works/OL45804W"));
/// assert!(!bookmarks.toggle("/works/OL45804W")?);
/// assert!(bookmarks.is_empty());
/// # Ok::<(), bookhunt::BookhuntError>(())
/// ```
#[derive(Debug)]
pub struct BookmarkStore {
    ids: Vec<String>,
    backend: Box<dyn KeyValueStore>,
}

impl BookmarkStore {
    /// Loads the persisted reading list from `backend`.
    ///
    /// Never fails: a missing key, an unreadable backend or a value that does
    /// not decode as a list of strings all yield an empty set. Duplicate
    /// identifiers in the stored list are collapsed, keeping the first.
    #[must_use]
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        let _span = tracing::debug_span!("bookmarks_open").entered();

        let ids = match backend.get(READING_LIST_KEY) {
            Ok(Some(raw)) => decode_list(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored reading list is malformed, starting empty");
                Vec::new()
            }),
            Ok(None) => {
                tracing::debug!("no stored reading list");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read reading list, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = ids.len(), "reading list loaded");
        Self { ids, backend }
    }

    /// Adds `id` if absent, removes it if present, then persists the list.
    ///
    /// The in-memory set is updated even when persisting fails, so the
    /// session keeps reflecting what the user chose.
    ///
    /// # Returns
    ///
    /// `true` if `id` is bookmarked after the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be written.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let _span = tracing::debug_span!("bookmarks_toggle", id = %id).entered();

        let bookmarked = if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.to_string());
            true
        };

        tracing::debug!(bookmarked, count = self.ids.len(), "bookmark toggled");
        self.persist()?;
        Ok(bookmarked)
    }

    /// Whether `id` is bookmarked.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Bookmarked identifiers in insertion order.
    #[must_use]
    pub fn list(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The backing store.
    #[must_use]
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    fn persist(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.ids)
            .map_err(|e| BookhuntError::Storage(format!("failed to encode reading list: {e}")))?;
        self.backend.set(READING_LIST_KEY, &encoded)
    }
}

fn decode_list(raw: &str) -> Result<Vec<String>> {
    let decoded: Vec<String> = serde_json::from_str(raw)
        .map_err(|e| BookhuntError::Storage(format!("failed to decode reading list: {e}")))?;

    let mut ids: Vec<String> = Vec::with_capacity(decoded.len());
    for id in decoded {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}
