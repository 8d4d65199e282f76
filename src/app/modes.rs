//! Input and view mode state types for the application.
//!
//! This module defines the state machine enums that control user interaction
//! modes and which list is displayed. These types determine which keybindings
//! are active and how input is processed.
//!
//! # State Machine
//!
//! The application operates in one of three input modes:
//! - **Normal**: Default navigation and command mode
//! - **Search**: Typing into the search box
//! - **Filters**: Filter panel open, navigation keys cycle genre and language
//!
//! View modes control which list is visible:
//! - **Discover**: Catalog results for the current query
//! - **`ReadingList`**: Details of the bookmarked works
//!
//! # Example
//!
//! ```rust
//! use bookhunt::app::modes::{InputMode, ViewMode};
//!
//! let input_mode = InputMode::Search;
//! let view_mode = ViewMode::Discover;
//! assert_ne!(input_mode, InputMode::Normal);
//! assert_eq!(view_mode, ViewMode::default());
//! ```

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), / (search), f (filters),
    /// g/G and l/L (cycle filters), space/b (bookmark), enter (details),
    /// r (reading list), m (more), R (retry), q (quit).
    #[default]
    Normal,

    /// Typing into the search box.
    ///
    /// Every printable key edits the live text; enter or escape return to
    /// Normal without clearing it.
    Search,

    /// Filter panel open.
    ///
    /// j/k cycle the genre, h/l cycle the language, escape or f close.
    Filters,
}

/// Which list is displayed.
///
/// Changes the header title and which background fetches are active: query
/// fetches only run in Discover, detail lookups only in `ReadingList`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Catalog results for the committed query.
    ///
    /// Header displays "Popular Books" or "Search Results".
    #[default]
    Discover,

    /// The bookmarked works.
    ///
    /// Header displays "Reading List (N books)".
    ReadingList,
}
