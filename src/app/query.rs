//! Query controller: search text, filters and the page cursor.
//!
//! The controller separates the *live* search text (what is in the search box)
//! from the *committed* [`SearchQuery`] that defines the current epoch. Live
//! text only becomes part of a query once the debounce window elapses; genre
//! and language changes commit immediately.

use crate::catalog::SearchQuery;
use crate::domain::{Genre, Language};

/// Owns the inputs of the current query epoch and its page cursor.
///
/// # Invariants
///
/// - `page >= 1`
/// - every change of the committed query resets `page` to 1
#[derive(Debug, Clone)]
pub struct QueryController {
    live_text: String,
    committed: SearchQuery,
    page: u32,
}

impl QueryController {
    /// Starts with empty text and the given filters on page 1.
    #[must_use]
    pub fn new(genre: Genre, language: Language) -> Self {
        Self {
            live_text: String::new(),
            committed: SearchQuery::new("", genre, language),
            page: 1,
        }
    }

    /// The committed query, i.e. the current epoch.
    #[must_use]
    pub const fn query(&self) -> &SearchQuery {
        &self.committed
    }

    /// Text currently in the search box, possibly not yet committed.
    #[must_use]
    pub fn live_text(&self) -> &str {
        &self.live_text
    }

    /// Current page cursor, starting at 1.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn genre(&self) -> Genre {
        self.committed.genre
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.committed.language
    }

    /// Replaces the live text without committing it.
    pub fn set_live_text(&mut self, text: impl Into<String>) {
        self.live_text = text.into();
    }

    /// Commits the live text as the query text and starts a new epoch.
    pub fn commit_text(&mut self) {
        self.committed.text.clone_from(&self.live_text);
        self.page = 1;
    }

    /// Sets the genre filter.
    ///
    /// # Returns
    ///
    /// `true` if the genre changed and a new epoch began, `false` if `genre`
    /// was already active.
    pub fn set_genre(&mut self, genre: Genre) -> bool {
        if self.committed.genre == genre {
            return false;
        }
        self.committed.genre = genre;
        self.page = 1;
        true
    }

    /// Sets the language filter.
    ///
    /// # Returns
    ///
    /// `true` if the language changed and a new epoch began.
    pub fn set_language(&mut self, language: Language) -> bool {
        if self.committed.language == language {
            return false;
        }
        self.committed.language = language;
        self.page = 1;
        true
    }

    /// Moves the cursor to the next page and returns it.
    pub fn advance_page(&mut self) -> u32 {
        self.page += 1;
        self.page
    }
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new(Genre::All, Language::ENGLISH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_text_is_not_part_of_the_query_until_committed() {
        let mut query = QueryController::default();
        query.set_live_text("dune");
        assert_eq!(query.query().text, "");

        query.commit_text();
        assert_eq!(query.query().text, "dune");
    }

    #[test]
    fn filter_changes_reset_the_cursor() {
        let mut query = QueryController::default();
        query.advance_page();
        query.advance_page();
        assert_eq!(query.page(), 3);

        assert!(query.set_genre(Genre::Horror));
        assert_eq!(query.page(), 1);

        query.advance_page();
        assert!(query.set_language(Language::from_code("spa").unwrap()));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn setting_the_active_filter_is_a_no_op() {
        let mut query = QueryController::default();
        query.advance_page();
        assert!(!query.set_genre(Genre::All));
        assert!(!query.set_language(Language::ENGLISH));
        assert_eq!(query.page(), 2);
    }
}
