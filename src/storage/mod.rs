//! Storage layer for the persistent reading list.
//!
//! The plugin persists a single value, the reading list, through a small
//! key-value abstraction backed by a JSON file in the plugin data directory.
//!
//! # Modules
//!
//! - `backend`: Key-value trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `memory`: In-process storage for tests and fallback
//! - `bookmarks`: Ordered bookmark set with write-through persistence

pub mod backend;
pub mod bookmarks;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use bookmarks::{BookmarkStore, READING_LIST_KEY};
pub use json::{JsonStorage, STORAGE_FILE_NAME};
pub use memory::MemoryStorage;
