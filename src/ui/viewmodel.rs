//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state,
//! following the MVVM pattern. View models are optimized for rendering and
//! contain pre-computed display information like truncated columns, highlight
//! ranges and selection state.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Book rows inside the visible window.
    pub display_items: Vec<DisplayItem>,

    /// Index of the selected row within `display_items`.
    pub selected_index: usize,

    pub header: HeaderInfo,

    pub footer: FooterInfo,

    /// Shown in place of the list when there is nothing to display.
    pub empty_state: Option<EmptyState>,

    /// Search box, shown in the discover view while typing or when text is set.
    pub search_bar: Option<SearchBarInfo>,

    /// Genre and language selector, shown while the panel is open.
    pub filter_panel: Option<FilterPanelInfo>,

    /// Detail overlay for the selected book.
    pub detail: Option<DetailInfo>,

    /// Loading, error or summary line above the footer.
    pub status: Option<StatusLine>,
}

/// Display information for a single book row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, truncated to the title column.
    pub title: String,

    /// First author or fallback, truncated to the author column.
    pub author: String,

    /// First-publish year or fallback.
    pub year: String,

    /// Up to three subjects joined with `", "`, truncated to the remaining width.
    pub subjects: String,

    pub is_selected: bool,

    pub is_bookmarked: bool,

    /// Character ranges of the title matching the committed query.
    ///
    /// Each tuple is `(start_index, end_index)` in character indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. `" Search Results (40) "`.
    pub title: String,

    /// Active filters, e.g. `"Genre: Fantasy  Language: German"`.
    pub filters: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current mode.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "Your reading list is empty").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Live search text.
    pub query: String,

    /// Whether keystrokes currently go to the search box.
    pub is_focused: bool,

    /// Whether the text is waiting for the debounce window to elapse.
    pub is_pending: bool,
}

/// One selectable entry in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub is_active: bool,
}

/// Filter panel display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelInfo {
    /// Every genre, the active one marked.
    pub genres: Vec<FilterChip>,

    /// Active language as `"German (ger)"`.
    pub language: String,
}

/// Detail overlay display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    /// All authors joined, or the fallback.
    pub authors: String,
    /// Year with age, e.g. `"1965 (61 years ago)"`.
    pub published: String,
    pub publisher: Option<String>,
    pub pages: Option<String>,
    /// Language display names joined, omitted when none are listed.
    pub languages: Option<String>,
    /// Up to eight subjects.
    pub subjects: Vec<String>,
    pub cover_url: String,
    pub is_bookmarked: bool,
}

/// Severity of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Loading,
    Error,
}

/// Status line display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}
