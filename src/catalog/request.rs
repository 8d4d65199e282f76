//! Request construction for the Open Library API.

use super::tag::{DetailTag, PageTag};
use crate::domain::{Genre, Language};
use serde::{Deserialize, Serialize};

/// Base URL of the catalog API.
pub const API_BASE: &str = "https://openlibrary.org";

/// Number of items requested per page.
pub const PAGE_SIZE: usize = 20;

/// Term searched when no free text is committed.
pub const DEFAULT_TERM: &str = "popular";

/// Image shown for books without a cover.
pub const PLACEHOLDER_COVER_URL: &str =
    "https://images.unsplash.com/photo-1543002588-bfa74002ed7e?auto=format&fit=crop&q=80&w=400";

/// The inputs of one query epoch.
///
/// Two requests belong to the same epoch exactly when their `SearchQuery`
/// values are equal. Any change of text, genre or language starts a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Committed free text, possibly empty.
    pub text: String,
    pub genre: Genre,
    pub language: Language,
}

impl SearchQuery {
    #[must_use]
    pub fn new(text: impl Into<String>, genre: Genre, language: Language) -> Self {
        Self {
            text: text.into(),
            genre,
            language,
        }
    }

    /// The `q` parameter: committed text or [`DEFAULT_TERM`], plus the genre constraint.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookhunt::catalog::SearchQuery;
    /// use bookhunt::domain::{Genre, Language};
    ///
    /// let query = SearchQuery::new("", Genre::Fantasy, Language::default());
    /// assert_eq!(query.effective_term(), "popular subject:fantasy");
    /// ```
    #[must_use]
    pub fn effective_term(&self) -> String {
        let text = self.text.trim();
        let base = if text.is_empty() { DEFAULT_TERM } else { text };

        match self.genre.subject_constraint() {
            Some(constraint) => format!("{base} {constraint}"),
            None => base.to_string(),
        }
    }

    /// Whether free text is committed, i.e. the list shows search results.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Full search URL for `page` (1-based).
    #[must_use]
    pub fn search_url(&self, page: u32) -> String {
        format!(
            "{API_BASE}/search.json?q={}&language={}&page={page}&limit={PAGE_SIZE}",
            urlencoding::encode(&self.effective_term()),
            self.language.code(),
        )
    }
}

/// Work lookup URL for an identifier such as `/works/OL45804W` or `OL45804W`.
#[must_use]
pub fn work_url(id: &str) -> String {
    let bare = id.trim_start_matches('/');
    let bare = bare.strip_prefix("works/").unwrap_or(bare);
    format!("{API_BASE}/works/{}.json", urlencoding::encode(bare))
}

/// Large cover image URL, or the placeholder when there is no cover.
#[must_use]
pub fn cover_url(cover_id: Option<i64>) -> String {
    cover_id.map_or_else(
        || PLACEHOLDER_COVER_URL.to_string(),
        |id| format!("https://covers.openlibrary.org/b/id/{id}-L.jpg"),
    )
}

/// An outgoing catalog page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub tag: PageTag,
    pub url: String,
}

impl PageRequest {
    #[must_use]
    pub fn new(tag: PageTag) -> Self {
        let url = tag.query.search_url(tag.page);
        Self { tag, url }
    }
}

/// An outgoing work lookup for one bookmarked identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub tag: DetailTag,
    pub url: String,
}

impl DetailRequest {
    #[must_use]
    pub fn new(tag: DetailTag) -> Self {
        let url = work_url(&tag.id);
        Self { tag, url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_searches_popular() {
        let query = SearchQuery::default();
        assert_eq!(query.effective_term(), "popular");
        assert!(!query.has_text());
    }

    #[test]
    fn genre_constraint_is_lowercased_and_appended() {
        let query = SearchQuery::new("dune", Genre::ScienceFiction, Language::ENGLISH);
        assert_eq!(query.effective_term(), "dune subject:science fiction");
    }

    #[test]
    fn search_url_encodes_term_and_passes_language() {
        let language = Language::from_code("fre").unwrap();
        let query = SearchQuery::new("le petit prince", Genre::All, language);
        assert_eq!(
            query.search_url(2),
            "https://openlibrary.org/search.json?q=le%20petit%20prince&language=fre&page=2&limit=20"
        );
    }

    #[test]
    fn work_url_strips_works_prefix() {
        assert_eq!(work_url("/works/OL45804W"), "https://openlibrary.org/works/OL45804W.json");
        assert_eq!(work_url("OL45804W"), "https://openlibrary.org/works/OL45804W.json");
    }

    #[test]
    fn cover_url_falls_back_to_placeholder() {
        assert_eq!(cover_url(Some(8_231_856)), "https://covers.openlibrary.org/b/id/8231856-L.jpg");
        assert_eq!(cover_url(None), PLACEHOLDER_COVER_URL);
    }
}
