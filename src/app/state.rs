//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the plugin,
//! along with selection management and UI view model generation. It is the
//! single source of truth for the query, the accumulated results, the reading
//! list and all transient UI state.
//!
//! # State Components
//!
//! - **Query**: Live and committed search text, filters, page cursor
//! - **Results**: Items of the current epoch and the in-flight request
//! - **Debouncer**: Token of the pending search text commit
//! - **Bookmarks**: Persisted reading-list identifiers
//! - **Reading List**: Details of the bookmarked works for display
//! - **Modes**: Input mode, view mode and the detail overlay flag
//!
//! # View Model Computation
//!
//! The `compute_viewmodel` method transforms state into a renderable UI
//! representation, handling windowing, query-term highlighting, column
//! truncation and empty, loading and error states.
//!
//! # Example
//!
//! ```rust
//! use bookhunt::app::AppState;
//! use bookhunt::storage::{BookmarkStore, MemoryStorage};
//! use bookhunt::ui::Theme;
//!
//! let bookmarks = BookmarkStore::open(Box::new(MemoryStorage::new()));
//! let state = AppState::new(bookmarks, Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.display_items.is_empty());
//! ```

use super::debounce::Debouncer;
use super::details::ReadingList;
use super::modes::{InputMode, ViewMode};
use super::query::QueryController;
use super::results::ResultAccumulator;
use crate::catalog::cover_url;
use crate::domain::{language_display_name, BookSummary, Genre};
use crate::storage::BookmarkStore;
use crate::ui::helpers::{coalesce_ranges, truncate_chars, ColumnLayout};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, EmptyState, FilterChip, FilterPanelInfo, FooterInfo, HeaderInfo,
    SearchBarInfo, StatusKind, StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Moving the selection within this many rows of the end loads the next page.
pub const LOAD_MORE_THRESHOLD: usize = 3;

const ROW_SUBJECTS: usize = 3;
const DETAIL_SUBJECTS: usize = 8;

/// Central application state container.
///
/// Mutated by the event handler in response to user input and host events.
/// View models are computed on demand from state snapshots.
#[derive(Debug)]
pub struct AppState {
    /// Search text, filters and page cursor.
    pub query: QueryController,

    /// Results of the current epoch.
    pub results: ResultAccumulator,

    /// Pending search text commit.
    pub debouncer: Debouncer,

    /// Persisted reading-list identifiers.
    pub bookmarks: BookmarkStore,

    /// Details of the bookmarked works, rebuilt while the reading list is shown.
    pub reading_list: ReadingList,

    /// Zero-based index of the selected row in the visible list.
    ///
    /// Clamped to the list bounds by `clamp_selection()`.
    pub selected_index: usize,

    pub input_mode: InputMode,

    pub view_mode: ViewMode,

    /// Whether the detail overlay for the selected book is open.
    pub detail_open: bool,

    /// Set when a page fetch was due but could not be issued, either because
    /// the reading list is shown or web access is not granted yet.
    pub fetch_deferred: bool,

    /// Whether the host granted web access.
    pub web_access: bool,

    /// Last reading-list persistence failure, cleared by the next success.
    pub storage_error: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state with default filters.
    ///
    /// The first page fetch is deferred until web access is granted.
    ///
    /// # Parameters
    ///
    /// * `bookmarks` - Loaded reading list
    /// * `theme` - Color scheme for UI rendering
    #[must_use]
    pub fn new(bookmarks: BookmarkStore, theme: Theme) -> Self {
        Self {
            query: QueryController::default(),
            results: ResultAccumulator::new(),
            debouncer: Debouncer::default(),
            bookmarks,
            reading_list: ReadingList::new(),
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Discover,
            detail_open: false,
            fetch_deferred: true,
            web_access: false,
            storage_error: None,
            theme,
        }
    }

    /// Replaces the initial query filters and debounce delay.
    #[must_use]
    pub fn with_query(mut self, query: QueryController, debouncer: Debouncer) -> Self {
        self.query = query;
        self.debouncer = debouncer;
        self
    }

    /// The list shown in the current view.
    #[must_use]
    pub fn visible_books(&self) -> &[BookSummary] {
        match self.view_mode {
            ViewMode::Discover => self.results.items(),
            ViewMode::ReadingList => self.reading_list.books(),
        }
    }

    /// Returns the currently selected book, if any.
    #[must_use]
    pub fn selected_book(&self) -> Option<&BookSummary> {
        self.visible_books().get(self.selected_index)
    }

    /// Moves the selection down by one row, stopping at the last row.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1).min(len - 1);
    }

    /// Moves the selection up by one row, stopping at the first row.
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Keeps the selection inside the visible list.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_books().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
        if len == 0 {
            self.detail_open = false;
        }
    }

    /// Whether the selection is close enough to the end to load more.
    #[must_use]
    pub fn selection_near_end(&self) -> bool {
        let len = self.visible_books().len();
        len > 0 && self.selected_index + LOAD_MORE_THRESHOLD >= len
    }

    /// Whether page requests may be issued right now.
    #[must_use]
    pub fn can_fetch_pages(&self) -> bool {
        self.web_access && self.view_mode == ViewMode::Discover
    }

    fn search_bar_visible(&self) -> bool {
        self.view_mode == ViewMode::Discover
            && (self.input_mode == InputMode::Search || !self.query.live_text().is_empty())
    }

    /// Computes a renderable UI view model from current state and terminal dimensions.
    ///
    /// # Parameters
    ///
    /// * `rows` - Terminal height in character cells
    /// * `cols` - Terminal width in character cells
    ///
    /// # Windowing Algorithm
    ///
    /// 1. Calculate available rows after subtracting UI chrome
    /// 2. Center window around selected index
    /// 3. Adjust window if near the end to maximize visible items
    /// 4. Compute relative selection index within visible window
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let books = self.visible_books();
        let available_rows = self.calculate_available_rows(rows);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(books.len());

        let actual_count = visible_end.saturating_sub(visible_start);
        if actual_count < available_rows && books.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }
        let visible_start = visible_start.min(visible_end);

        let matcher = match self.view_mode {
            ViewMode::Discover if self.query.query().has_text() => Some(SkimMatcherV2::default()),
            _ => None,
        };
        let layout = ColumnLayout::for_width(cols);

        let display_items = books[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, book)| {
                self.compute_display_item(book, visible_start + relative_idx, &layout, matcher.as_ref())
            })
            .collect();

        let detail = if self.detail_open {
            self.selected_book().map(|book| self.compute_detail(book))
        } else {
            None
        };

        UIViewModel {
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            header: self.compute_header(),
            footer: self.compute_footer(),
            empty_state: if books.is_empty() { self.compute_empty_state() } else { None },
            search_bar: self.compute_search_bar(),
            filter_panel: self.compute_filter_panel(),
            detail,
            status: self.compute_status(),
        }
    }

    fn compute_display_item(
        &self,
        book: &BookSummary,
        absolute_idx: usize,
        layout: &ColumnLayout,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        let title = truncate_chars(&book.title, layout.title);
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            let shown = if title == book.title {
                title.chars().count()
            } else {
                layout.title.saturating_sub(3)
            };
            self.compute_highlight_ranges(&book.title, m)
                .into_iter()
                .filter(|(start, _)| *start < shown)
                .map(|(start, end)| (start, end.min(shown)))
                .collect()
        });

        DisplayItem {
            title,
            author: truncate_chars(book.primary_author(), layout.author),
            year: book.publish_year_display(),
            subjects: truncate_chars(&book.subjects_preview(ROW_SUBJECTS).join(", "), layout.subjects),
            is_selected: absolute_idx == self.selected_index,
            is_bookmarked: self.bookmarks.contains(&book.id),
            highlight_ranges,
        }
    }

    /// Character ranges of `text` matching the committed query text.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        matcher
            .fuzzy_indices(text, self.query.query().text.trim())
            .map_or_else(Vec::new, |(_score, indices)| coalesce_ranges(&indices))
    }

    fn compute_detail(&self, book: &BookSummary) -> DetailInfo {
        let published = match book.publication_age() {
            Some(age) => format!("{} ({age})", book.publish_year_display()),
            None => book.publish_year_display(),
        };

        let languages = book.language_codes();
        let languages = (!languages.is_empty()).then(|| {
            languages
                .iter()
                .map(|code| language_display_name(code))
                .collect::<Vec<_>>()
                .join(", ")
        });

        DetailInfo {
            title: book.title.clone(),
            authors: book.authors_display(),
            published,
            publisher: book.primary_publisher().map(str::to_string),
            pages: book.page_count.map(|pages| format!("{pages} pages")),
            languages,
            subjects: book.subjects_preview(DETAIL_SUBJECTS).to_vec(),
            cover_url: cover_url(book.cover_id),
            is_bookmarked: self.bookmarks.contains(&book.id),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Discover => {
                let name = if self.query.query().has_text() {
                    "Search Results"
                } else {
                    "Popular Books"
                };
                format!(" {name} ({}) ", self.results.items().len())
            }
            ViewMode::ReadingList => {
                let count = self.bookmarks.len();
                let noun = if count == 1 { "book" } else { "books" };
                format!(" Reading List ({count} {noun}) ")
            }
        };

        HeaderInfo {
            title,
            filters: format!(
                "Genre: {}  Language: {}",
                self.query.genre(),
                self.query.language().display_name()
            ),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.detail_open {
            "Esc: close  Space: bookmark  q: quit"
        } else {
            match (self.input_mode, self.view_mode) {
                (InputMode::Search, _) => "Type to search  Backspace: delete  Enter/Esc: done",
                (InputMode::Filters, _) => "j/k: genre  h/l: language  Esc/f: close",
                (InputMode::Normal, ViewMode::Discover) => {
                    "j/k: move  /: search  f: filters  g/l: genre/language  Space: save  Enter: details  r: reading list  q: quit"
                }
                (InputMode::Normal, ViewMode::ReadingList) => {
                    "j/k: move  Space: remove  Enter: details  R: reload  r: discover  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        self.search_bar_visible().then(|| SearchBarInfo {
            query: self.query.live_text().to_string(),
            is_focused: self.input_mode == InputMode::Search,
            is_pending: self.debouncer.is_pending(),
        })
    }

    fn compute_filter_panel(&self) -> Option<FilterPanelInfo> {
        if self.input_mode != InputMode::Filters {
            return None;
        }

        let active = self.query.genre();
        let language = self.query.language();

        Some(FilterPanelInfo {
            genres: Genre::ALL
                .iter()
                .map(|genre| FilterChip {
                    label: genre.label().to_string(),
                    is_active: *genre == active,
                })
                .collect(),
            language: format!("{} ({})", language.display_name(), language.code()),
        })
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        let (message, subtitle) = match self.view_mode {
            ViewMode::ReadingList if self.bookmarks.is_empty() => (
                "Your reading list is empty",
                "Press space on a book to save it for later",
            ),
            ViewMode::ReadingList if self.reading_list.is_loading() || !self.web_access => {
                return None
            }
            ViewMode::ReadingList => ("Could not load your saved books", "Press R to try again"),
            ViewMode::Discover
                if self.results.is_loading()
                    || self.fetch_deferred
                    || self.results.last_error().is_some() =>
            {
                return None
            }
            ViewMode::Discover => ("No books found", "Try a different search, genre or language"),
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    fn compute_status(&self) -> Option<StatusLine> {
        let status = |kind, message: String| Some(StatusLine { kind, message });

        if let Some(error) = &self.storage_error {
            return status(StatusKind::Error, format!("Could not save reading list: {error}"));
        }
        if !self.web_access {
            return status(StatusKind::Info, "Waiting for web access permission".to_string());
        }

        match self.view_mode {
            ViewMode::ReadingList if self.reading_list.is_loading() => status(
                StatusKind::Loading,
                format!("Loading reading list ({} remaining)...", self.reading_list.pending()),
            ),
            ViewMode::ReadingList => None,
            ViewMode::Discover => {
                let count = self.results.items().len();
                if let Some(tag) = self.results.in_flight() {
                    let message = if tag.page == 1 {
                        "Loading books...".to_string()
                    } else {
                        format!("Loading page {}...", tag.page)
                    };
                    status(StatusKind::Loading, message)
                } else if let (Some(error), Some(page)) =
                    (self.results.last_error(), self.results.failed_page())
                {
                    status(
                        StatusKind::Error,
                        format!("Failed to load page {page}: {error}  (R: retry)"),
                    )
                } else if count == 0 || self.fetch_deferred {
                    None
                } else if self.results.has_more() {
                    status(
                        StatusKind::Info,
                        format!("{count} of {} books", self.results.num_found()),
                    )
                } else {
                    status(StatusKind::Info, format!("{count} books, end of results"))
                }
            }
        }
    }

    /// Calculates rows available for the book list after subtracting UI chrome.
    ///
    /// Accounts for the blank top line, header, border, column headers, status
    /// line, footer border and footer (7 rows), plus the search bar (3 rows)
    /// and filter panel (3 rows) when shown.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mut chrome = 7;
        if self.search_bar_visible() {
            chrome += 3;
        }
        if self.input_mode == InputMode::Filters {
            chrome += 3;
        }
        total_rows.saturating_sub(chrome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SearchPage;
    use crate::storage::MemoryStorage;

    fn state_with_books(n: usize) -> AppState {
        let mut state = AppState::new(
            BookmarkStore::open(Box::new(MemoryStorage::new())),
            Theme::default(),
        );
        state.web_access = true;
        state.fetch_deferred = false;
        let query = state.query.query().clone();
        let tag = state.results.begin(&query, 1).unwrap();
        let page = SearchPage::new(
            (0..n)
                .map(|i| BookSummary::new(format!("/works/OL{i}W"), format!("Book {i}")))
                .collect(),
            100,
        );
        state.results.apply(&tag, Ok(page), &query);
        state
    }

    #[test]
    fn selection_stops_at_list_edges() {
        let mut state = state_with_books(2);
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        state.move_selection_down();
        state.move_selection_down();
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn window_follows_selection() {
        let mut state = state_with_books(50);
        state.selected_index = 40;
        let vm = state.compute_viewmodel(24, 100);

        assert_eq!(vm.display_items.len(), 17);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].title, "Book 40");
    }

    #[test]
    fn header_names_the_view() {
        let mut state = state_with_books(3);
        assert_eq!(state.compute_viewmodel(24, 80).header.title, " Popular Books (3) ");

        state.view_mode = ViewMode::ReadingList;
        assert_eq!(
            state.compute_viewmodel(24, 80).header.title,
            " Reading List (0 books) "
        );
    }

    #[test]
    fn empty_reading_list_shows_message() {
        let mut state = state_with_books(0);
        state.view_mode = ViewMode::ReadingList;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(
            vm.empty_state.map(|e| e.message).as_deref(),
            Some("Your reading list is empty")
        );
    }

    #[test]
    fn detail_overlay_uses_fallbacks() {
        let mut state = state_with_books(1);
        state.detail_open = true;
        let detail = state.compute_viewmodel(24, 80).detail.unwrap();
        assert_eq!(detail.authors, "Unknown Author");
        assert_eq!(detail.published, "Unknown");
        assert_eq!(detail.languages, None);
        assert_eq!(detail.cover_url, crate::catalog::PLACEHOLDER_COVER_URL);
    }

    #[test]
    fn near_end_detection() {
        let mut state = state_with_books(10);
        state.selected_index = 6;
        assert!(!state.selection_near_end());
        state.selected_index = 7;
        assert!(state.selection_near_end());
    }
}
