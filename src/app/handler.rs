//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input,
//! host events and catalog responses, translating them into state changes
//! and action sequences. It serves as the primary control flow coordinator
//! for the application.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenDetail`, `CloseDetail`
//! - **Input**: `Char`, `Backspace`, `SetSearchText`
//! - **Mode Switching**: `SearchMode`, `ExitSearch`, `ToggleFilters`, `ToggleReadingList`
//! - **Query**: `NextGenre`, `SetLanguage`, `AdvancePage`, `Retry`, ...
//! - **Host**: `DebounceElapsed`, `PermissionsResult`, `PageLoaded`, `DetailLoaded`
//!
//! # Query Epochs
//!
//! Every change of the committed query (debounced text, genre, language)
//! starts a new epoch: results are cleared and page 1 is requested. Page
//! requests are issued only from the discover view with web access granted;
//! otherwise the fetch is deferred and re-issued once both hold.
//!
//! # Example
//!
//! ```rust
//! use bookhunt::app::{handle_event, AppState, Event};
//! use bookhunt::storage::{BookmarkStore, MemoryStorage};
//! use bookhunt::ui::Theme;
//!
//! let bookmarks = BookmarkStore::open(Box::new(MemoryStorage::new()));
//! let mut state = AppState::new(bookmarks, Theme::default());
//! let (_render, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 1); // page 1 of the popular list
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::modes::{InputMode, ViewMode};
use crate::app::results::ApplyOutcome;
use crate::app::{Action, AppState};
use crate::catalog::{CatalogResponse, DetailTag, PageRequest, PageTag, SearchPage};
use crate::domain::error::Result;
use crate::domain::{BookSummary, FetchError, Genre, Language};

/// Events triggered by user input, host notifications or catalog responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down by one row; close to the end, loads the next page.
    KeyDown,
    /// Moves selection up by one row.
    KeyUp,
    /// Hides the plugin UI.
    CloseFocus,

    /// Focuses the search box.
    SearchMode,
    /// Leaves the search box, keeping its text.
    ExitSearch,
    /// Appends a character to the live search text.
    Char(char),
    /// Removes the last character from the live search text.
    Backspace,
    /// Replaces the live search text.
    SetSearchText(String),
    /// A debounce timer fired.
    ///
    /// Only the most recently scheduled token commits the live text.
    DebounceElapsed {
        token: u64,
    },

    /// Opens or closes the filter panel.
    ToggleFilters,
    NextGenre,
    PrevGenre,
    NextLanguage,
    PrevLanguage,
    SetGenre(Genre),
    SetLanguage(Language),

    /// Requests the next page of the current epoch.
    ///
    /// Dropped while a fetch is in flight or the results are exhausted.
    AdvancePage,
    /// Re-issues the failed page, or reloads the reading list.
    Retry,

    /// Adds or removes the selected book from the reading list.
    ToggleBookmark,
    OpenDetail,
    CloseDetail,
    /// Switches between the discover view and the reading list.
    ToggleReadingList,

    /// Reports whether the host granted web access.
    PermissionsResult {
        granted: bool,
    },

    /// A search page request completed.
    PageLoaded {
        tag: PageTag,
        result: std::result::Result<SearchPage, FetchError>,
    },

    /// A work lookup of the reading list completed.
    DetailLoaded {
        tag: DetailTag,
        result: std::result::Result<BookSummary, FetchError>,
    },
}

impl From<CatalogResponse> for Event {
    fn from(response: CatalogResponse) -> Self {
        match response {
            CatalogResponse::Page { tag, result } => Self::PageLoaded { tag, result },
            CatalogResponse::Detail { tag, result } => Self::DetailLoaded { tag, result },
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to application state
/// * `event` - Event to process
///
/// # Returns
///
/// Whether the UI needs to re-render, and the actions to execute in sequence.
///
/// # Errors
///
/// Currently infallible. Persistence failures are recorded in state and
/// surfaced in the status line rather than propagated.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            let actions = if state.selection_near_end() {
                advance_page(state)
            } else {
                vec![]
            };
            Ok((true, actions))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SearchMode => {
            if state.view_mode != ViewMode::Discover {
                return Ok((false, vec![]));
            }
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            state.detail_open = false;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(text = %state.query.live_text(), "leaving search mode");
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let mut text = state.query.live_text().to_string();
            text.push(*c);
            Ok((true, set_search_text(state, text)))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return Ok((false, vec![]));
            }
            let mut text = state.query.live_text().to_string();
            if text.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, set_search_text(state, text)))
        }
        Event::SetSearchText(text) => Ok((true, set_search_text(state, text.clone()))),
        Event::DebounceElapsed { token } => {
            if !state.debouncer.fire(*token) {
                tracing::trace!(token, "superseded debounce timer");
                return Ok((false, vec![]));
            }

            if state.query.live_text() == state.query.query().text {
                tracing::debug!("search text unchanged, keeping epoch");
                return Ok((true, vec![]));
            }

            state.query.commit_text();
            tracing::debug!(text = %state.query.query().text, "search text committed");
            Ok((true, start_epoch(state)))
        }
        Event::ToggleFilters => {
            state.input_mode = if state.input_mode == InputMode::Filters {
                InputMode::Normal
            } else {
                InputMode::Filters
            };
            state.detail_open = false;
            Ok((true, vec![]))
        }
        Event::NextGenre => {
            let genre = state.query.genre().next();
            Ok(set_genre(state, genre))
        }
        Event::PrevGenre => {
            let genre = state.query.genre().previous();
            Ok(set_genre(state, genre))
        }
        Event::SetGenre(genre) => Ok(set_genre(state, *genre)),
        Event::NextLanguage => {
            let language = state.query.language().next();
            Ok(set_language(state, language))
        }
        Event::PrevLanguage => {
            let language = state.query.language().previous();
            Ok(set_language(state, language))
        }
        Event::SetLanguage(language) => Ok(set_language(state, *language)),
        Event::AdvancePage => {
            let actions = advance_page(state);
            Ok((!actions.is_empty(), actions))
        }
        Event::Retry => match state.view_mode {
            ViewMode::Discover => {
                let Some(page) = state.results.failed_page() else {
                    tracing::debug!("nothing to retry");
                    return Ok((false, vec![]));
                };
                tracing::debug!(page, "retrying failed page");
                let actions = request_page(state, page);
                Ok((!actions.is_empty(), actions))
            }
            ViewMode::ReadingList => Ok((true, refresh_reading_list(state))),
        },
        Event::ToggleBookmark => {
            let Some(id) = state.selected_book().map(|book| book.id.clone()) else {
                tracing::debug!("no book selected");
                return Ok((false, vec![]));
            };

            match state.bookmarks.toggle(&id) {
                Ok(added) => {
                    tracing::debug!(id = %id, added, "bookmark toggled");
                    state.storage_error = None;
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "failed to persist reading list");
                    state.storage_error = Some(e.to_string());
                }
            }

            if state.view_mode != ViewMode::ReadingList {
                return Ok((true, vec![]));
            }
            if !state.bookmarks.contains(&id) {
                state.reading_list.remove(&id);
                state.clamp_selection();
            }
            // earlier batches still hold the old id set
            Ok((true, refresh_reading_list(state)))
        }
        Event::OpenDetail => {
            if state.selected_book().is_none() {
                return Ok((false, vec![]));
            }
            state.detail_open = true;
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            let changed = state.detail_open;
            state.detail_open = false;
            Ok((changed, vec![]))
        }
        Event::ToggleReadingList => {
            state.input_mode = InputMode::Normal;
            state.detail_open = false;
            state.selected_index = 0;

            let actions = match state.view_mode {
                ViewMode::Discover => {
                    tracing::debug!(bookmarks = state.bookmarks.len(), "showing reading list");
                    state.view_mode = ViewMode::ReadingList;
                    refresh_reading_list(state)
                }
                ViewMode::ReadingList => {
                    tracing::debug!("showing discover view");
                    state.reading_list.abandon();
                    state.view_mode = ViewMode::Discover;
                    resume_deferred(state)
                }
            };
            Ok((true, actions))
        }
        Event::PermissionsResult { granted } => {
            state.web_access = *granted;
            if !granted {
                tracing::warn!("web access denied, catalog requests disabled");
                return Ok((true, vec![]));
            }

            tracing::info!("web access granted");
            let actions = match state.view_mode {
                ViewMode::Discover => resume_deferred(state),
                ViewMode::ReadingList => refresh_reading_list(state),
            };
            Ok((true, actions))
        }
        Event::PageLoaded { tag, result } => {
            let current = state.query.query().clone();
            match state.results.apply(tag, result.clone(), &current) {
                ApplyOutcome::Stale => Ok((false, vec![])),
                ApplyOutcome::Replaced => {
                    if state.view_mode == ViewMode::Discover {
                        state.selected_index = 0;
                    }
                    Ok((state.view_mode == ViewMode::Discover, vec![]))
                }
                ApplyOutcome::Appended | ApplyOutcome::Failed => {
                    Ok((state.view_mode == ViewMode::Discover, vec![]))
                }
            }
        }
        Event::DetailLoaded { tag, result } => {
            if state.view_mode != ViewMode::ReadingList {
                tracing::debug!(batch_id = tag.batch_id, "discarding detail outside reading list");
                return Ok((false, vec![]));
            }

            if state.reading_list.record(tag, result.clone()) {
                state.clamp_selection();
            }
            Ok((true, vec![]))
        }
    }
}

fn set_search_text(state: &mut AppState, text: String) -> Vec<Action> {
    tracing::trace!(text = %text, "live search text updated");
    state.query.set_live_text(text);
    let token = state.debouncer.schedule();
    let delay_ms = u64::try_from(state.debouncer.delay().as_millis()).unwrap_or(u64::MAX);
    vec![Action::ScheduleDebounce { token, delay_ms }]
}

fn set_genre(state: &mut AppState, genre: Genre) -> (bool, Vec<Action>) {
    if !state.query.set_genre(genre) {
        return (false, vec![]);
    }
    tracing::debug!(genre = %genre, "genre changed");
    (true, start_epoch(state))
}

fn set_language(state: &mut AppState, language: Language) -> (bool, Vec<Action>) {
    if !state.query.set_language(language) {
        return (false, vec![]);
    }
    tracing::debug!(language = language.code(), "language changed");
    (true, start_epoch(state))
}

/// Clears the results for the newly committed query and requests page 1.
fn start_epoch(state: &mut AppState) -> Vec<Action> {
    let _span = tracing::debug_span!("start_epoch", term = %state.query.query().effective_term()).entered();

    state.results.reset();
    state.selected_index = 0;
    state.detail_open = false;

    if !state.can_fetch_pages() {
        tracing::debug!("page fetch deferred");
        state.fetch_deferred = true;
        return vec![];
    }
    let page = state.query.page();
    request_page(state, page)
}

fn request_page(state: &mut AppState, page: u32) -> Vec<Action> {
    if !state.can_fetch_pages() {
        return vec![];
    }

    let query = state.query.query().clone();
    state.results.begin(&query, page).map_or_else(Vec::new, |tag| {
        tracing::debug!(request_id = tag.request_id, page, "requesting page");
        state.fetch_deferred = false;
        vec![Action::FetchPage(PageRequest::new(tag))]
    })
}

/// Requests the page after the cursor, or re-issues the cursor page if it failed.
fn advance_page(state: &mut AppState) -> Vec<Action> {
    if !state.can_fetch_pages() {
        return vec![];
    }
    if state.results.is_loading() {
        tracing::debug!("fetch in flight, dropping pagination trigger");
        return vec![];
    }

    let page = state.query.page();
    if state.results.failed_page() == Some(page) {
        return request_page(state, page);
    }
    if !state.results.has_more() || state.results.items().is_empty() {
        return vec![];
    }

    let next = state.query.advance_page();
    request_page(state, next)
}

/// Issues the fetch that was held back while it could not be sent.
fn resume_deferred(state: &mut AppState) -> Vec<Action> {
    if !state.fetch_deferred {
        return vec![];
    }
    tracing::debug!("resuming deferred page fetch");
    let page = state.query.page();
    request_page(state, page)
}

/// Starts a new detail batch for the current bookmarks.
fn refresh_reading_list(state: &mut AppState) -> Vec<Action> {
    if !state.web_access {
        return vec![];
    }

    let ids = state.bookmarks.list().to_vec();
    let actions = state
        .reading_list
        .start(&ids)
        .into_iter()
        .map(Action::FetchDetail)
        .collect();
    state.clamp_selection();
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::details::ReadingList;
    use crate::storage::{BookmarkStore, MemoryStorage};
    use crate::ui::theme::Theme;

    fn ready_state() -> AppState {
        let mut state = AppState::new(
            BookmarkStore::open(Box::new(MemoryStorage::new())),
            Theme::default(),
        );
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        assert_eq!(actions.len(), 1);
        state
    }

    fn page_tag(actions: &[Action]) -> PageTag {
        match actions {
            [Action::FetchPage(request)] => request.tag.clone(),
            other => panic!("expected one page fetch, got {other:?}"),
        }
    }

    fn books(prefix: &str, n: usize) -> SearchPage {
        SearchPage::new(
            (0..n)
                .map(|i| BookSummary::new(format!("/works/{prefix}{i}W"), format!("{prefix} {i}")))
                .collect(),
            1000,
        )
    }

    fn load(state: &mut AppState, tag: PageTag, page: SearchPage) {
        handle_event(state, &Event::PageLoaded { tag, result: Ok(page) }).unwrap();
    }

    #[test]
    fn initial_fetch_waits_for_permission() {
        let mut state = AppState::new(
            BookmarkStore::open(Box::new(MemoryStorage::new())),
            Theme::default(),
        );
        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: false }).unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let tag = page_tag(&actions);
        assert_eq!(tag.page, 1);
        assert_eq!(tag.query.effective_term(), "popular");
    }

    #[test]
    fn genre_change_resets_results_and_fetches_page_one() {
        let mut state = ready_state();
        let tag = state.results.in_flight().cloned().unwrap();
        load(&mut state, tag, books("a", 20));
        assert_eq!(state.results.items().len(), 20);

        let (render, actions) = handle_event(&mut state, &Event::SetGenre(Genre::Fantasy)).unwrap();
        assert!(render);
        assert!(state.results.items().is_empty());
        let tag = page_tag(&actions);
        assert_eq!(tag.page, 1);
        assert_eq!(tag.query.genre, Genre::Fantasy);

        let (render, actions) = handle_event(&mut state, &Event::SetGenre(Genre::Fantasy)).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn typing_only_commits_latest_token() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::SearchMode).unwrap();

        let mut tokens = vec![];
        for c in "dune".chars() {
            let (_, actions) = handle_event(&mut state, &Event::Char(c)).unwrap();
            match actions.as_slice() {
                [Action::ScheduleDebounce { token, delay_ms }] => {
                    assert_eq!(*delay_ms, 500);
                    tokens.push(*token);
                }
                other => panic!("expected debounce, got {other:?}"),
            }
        }

        let last = tokens.pop().unwrap();
        for token in tokens {
            let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { token }).unwrap();
            assert!(actions.is_empty());
        }
        assert_eq!(state.query.query().text, "");

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { token: last }).unwrap();
        assert_eq!(page_tag(&actions).query.text, "dune");
    }

    #[test]
    fn keys_outside_search_mode_are_ignored() {
        let mut state = ready_state();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.query.live_text(), "");
    }

    #[test]
    fn failed_page_is_retried_not_skipped() {
        let mut state = ready_state();
        let tag = state.results.in_flight().cloned().unwrap();
        load(&mut state, tag, books("a", 20));

        let (_, actions) = handle_event(&mut state, &Event::AdvancePage).unwrap();
        let second = page_tag(&actions);
        assert_eq!(second.page, 2);
        handle_event(
            &mut state,
            &Event::PageLoaded {
                tag: second,
                result: Err(FetchError::Transport("offline".into())),
            },
        )
        .unwrap();
        assert_eq!(state.results.items().len(), 20);

        let (_, actions) = handle_event(&mut state, &Event::AdvancePage).unwrap();
        assert_eq!(page_tag(&actions).page, 2);
    }

    #[test]
    fn retry_reissues_failed_page() {
        let mut state = ready_state();
        let tag = state.results.in_flight().cloned().unwrap();
        handle_event(
            &mut state,
            &Event::PageLoaded {
                tag,
                result: Err(FetchError::Status(503)),
            },
        )
        .unwrap();

        let (_, actions) = handle_event(&mut state, &Event::Retry).unwrap();
        assert_eq!(page_tag(&actions).page, 1);
    }

    #[test]
    fn reading_list_defers_query_fetches() {
        let mut state = ready_state();
        handle_event(&mut state, &Event::ToggleReadingList).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::SetLanguage(Language::from_code("ger").unwrap())).unwrap();
        assert!(actions.is_empty());
        assert!(state.fetch_deferred);

        let (_, actions) = handle_event(&mut state, &Event::ToggleReadingList).unwrap();
        assert_eq!(page_tag(&actions).query.language.code(), "ger");
    }

    #[test]
    fn bookmark_removal_updates_reading_list() {
        let mut state = ready_state();
        let tag = state.results.in_flight().cloned().unwrap();
        load(&mut state, tag, books("a", 3));

        handle_event(&mut state, &Event::ToggleBookmark).unwrap();
        assert!(state.bookmarks.contains("/works/a0W"));

        let (_, actions) = handle_event(&mut state, &Event::ToggleReadingList).unwrap();
        let Some(Action::FetchDetail(request)) = actions.first() else {
            panic!("expected detail lookup, got {actions:?}");
        };
        handle_event(
            &mut state,
            &Event::DetailLoaded {
                tag: request.tag.clone(),
                result: Ok(BookSummary::new("/works/a0W", "a 0")),
            },
        )
        .unwrap();
        assert_eq!(state.visible_books().len(), 1);

        handle_event(&mut state, &Event::ToggleBookmark).unwrap();
        assert!(state.bookmarks.is_empty());
        assert!(state.visible_books().is_empty());
        assert!(!state.reading_list.is_loading());
    }

    #[test]
    fn late_first_page_keeps_reading_list_cursor() {
        let mut state = ready_state();
        let popular = state.results.in_flight().cloned().unwrap();

        state.bookmarks.toggle("/works/OL1W").unwrap();
        state.bookmarks.toggle("/works/OL2W").unwrap();
        let (_, actions) = handle_event(&mut state, &Event::ToggleReadingList).unwrap();
        for (action, title) in actions.iter().zip(["One", "Two"]) {
            let Action::FetchDetail(request) = action else {
                panic!("expected detail lookup, got {action:?}");
            };
            handle_event(
                &mut state,
                &Event::DetailLoaded {
                    tag: request.tag.clone(),
                    result: Ok(BookSummary::new(request.tag.id.clone(), title)),
                },
            )
            .unwrap();
        }
        handle_event(&mut state, &Event::KeyDown).unwrap();
        assert_eq!(state.selected_index, 1);

        let (render, _) = handle_event(
            &mut state,
            &Event::PageLoaded { tag: popular, result: Ok(books("a", 20)) },
        )
        .unwrap();
        assert!(!render);
        assert_eq!(state.results.items().len(), 20);
        assert_eq!(state.selected_index, 1);
    }

    #[test]
    fn persistence_failure_keeps_toggle_in_memory() {
        let mut state = AppState::new(
            BookmarkStore::open(Box::new(MemoryStorage::new().failing_writes())),
            Theme::default(),
        );
        handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        let tag = state.results.in_flight().cloned().unwrap();
        load(&mut state, tag, books("a", 1));

        handle_event(&mut state, &Event::ToggleBookmark).unwrap();
        assert!(state.bookmarks.contains("/works/a0W"));
        assert!(state.storage_error.is_some());
    }

    #[test]
    fn late_details_after_leaving_reading_list_are_dropped() {
        let mut state = ready_state();
        let mut list = ReadingList::new();
        let requests = list.start(&["/works/OL1W".to_string()]);
        state.reading_list = list;

        let (render, _) = handle_event(
            &mut state,
            &Event::DetailLoaded {
                tag: requests[0].tag.clone(),
                result: Ok(BookSummary::new("/works/OL1W", "x")),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.reading_list.books().is_empty());
    }
}
