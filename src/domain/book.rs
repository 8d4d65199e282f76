//! Book domain model.
//!
//! A [`BookSummary`] is the sparse display record for one catalog item. It is
//! produced by decoding either a search document or a work record and is never
//! mutated afterwards. Only the identifier and the title are guaranteed; every
//! other field has a display fallback.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Shown when a book lists no authors.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Shown when a book has no first-publish year.
pub const UNKNOWN_YEAR: &str = "Unknown";

/// One catalog item as returned by the Open Library API.
///
/// # Fields
///
/// - `id`: Work key such as `/works/OL45804W`, the unique key of the item
/// - `title`: Display title
/// - `authors`: Author names in API order
/// - `first_publish_year`: Year of first publication
/// - `cover_id`: Numeric cover reference used to build the cover URL
/// - `subjects`: Subject tags in API order
/// - `languages`: ISO 639-2/B language codes
/// - `publishers`: Publisher names, first one is displayed
/// - `page_count`: Median page count across editions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub cover_id: Option<i64>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub publishers: Option<Vec<String>>,
    #[serde(default)]
    pub page_count: Option<u32>,
}

impl BookSummary {
    /// Creates a summary with only the required fields set.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookhunt::domain::BookSummary;
    ///
    /// let book = BookSummary::new("/works/OL45804W", "Dune");
    /// assert_eq!(book.primary_author(), "Unknown Author");
    /// assert_eq!(book.publish_year_display(), "Unknown");
    /// ```
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: None,
            first_publish_year: None,
            cover_id: None,
            subjects: None,
            languages: None,
            publishers: None,
            page_count: None,
        }
    }

    /// First listed author, or [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn primary_author(&self) -> &str {
        non_empty(self.authors.as_deref())
            .and_then(<[String]>::first)
            .map_or(UNKNOWN_AUTHOR, String::as_str)
    }

    /// All authors joined with `", "`, or [`UNKNOWN_AUTHOR`].
    #[must_use]
    pub fn authors_display(&self) -> String {
        non_empty(self.authors.as_deref())
            .map_or_else(|| UNKNOWN_AUTHOR.to_string(), |authors| authors.join(", "))
    }

    /// First-publish year as text, or [`UNKNOWN_YEAR`].
    #[must_use]
    pub fn publish_year_display(&self) -> String {
        self.first_publish_year
            .map_or_else(|| UNKNOWN_YEAR.to_string(), |year| year.to_string())
    }

    /// Human-readable age of the work, e.g. `"61 years ago"`.
    ///
    /// Returns `None` when the year is unknown or lies in the future.
    #[must_use]
    pub fn publication_age(&self) -> Option<String> {
        let year = self.first_publish_year?;
        let years = chrono::Utc::now().year() - year;
        match years {
            y if y < 0 => None,
            0 => Some("this year".to_string()),
            1 => Some("1 year ago".to_string()),
            y => Some(format!("{y} years ago")),
        }
    }

    /// First publisher, if any is listed.
    #[must_use]
    pub fn primary_publisher(&self) -> Option<&str> {
        non_empty(self.publishers.as_deref())
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Up to `limit` subject tags in API order.
    #[must_use]
    pub fn subjects_preview(&self, limit: usize) -> &[String] {
        let subjects = self.subjects.as_deref().unwrap_or_default();
        &subjects[..subjects.len().min(limit)]
    }

    /// Language codes, empty when none are listed.
    #[must_use]
    pub fn language_codes(&self) -> &[String] {
        self.languages.as_deref().unwrap_or_default()
    }
}

fn non_empty(values: Option<&[String]>) -> Option<&[String]> {
    values.filter(|v| !v.is_empty())
}
