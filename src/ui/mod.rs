//! User interface rendering layer with component-based architecture.
//!
//! This module orchestrates the terminal-based UI, transforming view models into
//! ANSI-styled output through composable rendering components. It provides theme
//! support, responsive column layout, and query-term highlighting.
//!
//! # Architecture
//!
//! The UI layer follows a declarative rendering model:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - `components`: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (layout, truncation, highlighting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust
//! use bookhunt::app::AppState;
//! use bookhunt::storage::{BookmarkStore, MemoryStorage};
//! use bookhunt::ui::{render, Theme};
//!
//! let state = AppState::new(BookmarkStore::open(Box::new(MemoryStorage::new())), Theme::default());
//! render(&state, 24, 80); // Renders to stdout
//! ```

pub mod viewmodel;
pub mod renderer;
mod components;
pub mod helpers;
pub mod theme;

pub use viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FilterChip, FilterPanelInfo, FooterInfo, HeaderInfo,
    SearchBarInfo, StatusKind, StatusLine, UIViewModel,
};
pub use renderer::render;
pub use theme::Theme;
