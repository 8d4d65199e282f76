//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the catalog/domain/storage layers. It
//! implements the event-driven architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──── Timers, Web Request Results ─┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input and view mode state machine types
//! - [`state`]: Central application state container and view model computation
//! - [`query`]: Live and committed search text, filters and page cursor
//! - [`results`]: Result accumulation with stale-response discard
//! - [`debounce`]: Token-based debouncing of search text commits
//! - [`details`]: Reading-list detail batches
//!
//! # Example
//!
//! ```rust
//! use bookhunt::app::{handle_event, AppState, Event};
//! use bookhunt::storage::{BookmarkStore, MemoryStorage};
//! use bookhunt::ui::Theme;
//!
//! let mut state = AppState::new(BookmarkStore::open(Box::new(MemoryStorage::new())), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod details;
pub mod handler;
pub mod modes;
pub mod query;
pub mod results;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use details::{DetailBatch, ReadingList};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewMode};
pub use query::QueryController;
pub use results::{ApplyOutcome, ResultAccumulator};
pub use state::{AppState, LOAD_MORE_THRESHOLD};
