//! Response decoding for the Open Library API.
//!
//! Both endpoints return loosely shaped JSON. Decoding is lenient: only the
//! work key and title matter, every other field is optional. Search documents
//! without a key are dropped.

use crate::domain::{BookSummary, FetchError};
use serde::Deserialize;

/// One decoded search page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    /// Decoded books in API relevance order.
    pub books: Vec<BookSummary>,
    /// Total hits reported by the API for the query.
    pub num_found: u64,
    /// Documents in the response, including those dropped for lacking a key.
    pub doc_count: usize,
}

impl SearchPage {
    /// A page whose documents all decoded.
    #[must_use]
    pub fn new(books: Vec<BookSummary>, num_found: u64) -> Self {
        Self {
            doc_count: books.len(),
            books,
            num_found,
        }
    }

    /// Whether more pages may follow. A response without documents ends
    /// pagination; one whose documents were all dropped does not.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.doc_count > 0
    }
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default, rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    key: Option<String>,
    title: Option<String>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i32>,
    cover_i: Option<i64>,
    subject: Option<Vec<String>>,
    language: Option<Vec<String>>,
    publisher: Option<Vec<String>>,
    number_of_pages_median: Option<u32>,
}

impl SearchDoc {
    fn into_summary(self) -> Option<BookSummary> {
        let id = self.key?;
        Some(BookSummary {
            title: self.title.unwrap_or_else(|| "Untitled".to_string()),
            authors: self.author_name,
            first_publish_year: self.first_publish_year,
            cover_id: self.cover_i,
            subjects: self.subject,
            languages: self.language,
            publishers: self.publisher,
            page_count: self.number_of_pages_median,
            ..BookSummary::new(id, String::new())
        })
    }
}

#[derive(Debug, Deserialize)]
struct WorkBody {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<WorkAuthor>,
    #[serde(default)]
    covers: Vec<i64>,
    first_publish_date: Option<String>,
    subjects: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct WorkAuthor {
    name: Option<String>,
}

/// Maps a host status code to a fetch error.
///
/// Status 0 means the request never reached the server.
///
/// # Errors
///
/// Returns [`FetchError::Transport`] for status 0 and [`FetchError::Status`]
/// for any other non-2xx status.
pub fn check_status(status: u16, body: &[u8]) -> Result<(), FetchError> {
    match status {
        200..=299 => Ok(()),
        0 => Err(FetchError::Transport(
            String::from_utf8_lossy(body).trim().to_string(),
        )),
        other => Err(FetchError::Status(other)),
    }
}

/// Decodes a search response.
///
/// # Errors
///
/// Returns a [`FetchError`] for a failed status or a body that is not a
/// search result object.
pub fn decode_search_page(status: u16, body: &[u8]) -> Result<SearchPage, FetchError> {
    let _span = tracing::debug_span!("decode_search_page", status, body_len = body.len()).entered();

    check_status(status, body)?;

    let parsed: SearchBody =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let doc_count = parsed.docs.len();
    let books: Vec<BookSummary> = parsed
        .docs
        .into_iter()
        .filter_map(SearchDoc::into_summary)
        .collect();

    if books.len() < doc_count {
        tracing::warn!(dropped = doc_count - books.len(), "search documents without a key");
    }
    tracing::debug!(count = books.len(), num_found = parsed.num_found, "search page decoded");

    Ok(SearchPage {
        books,
        num_found: parsed.num_found,
        doc_count,
    })
}

/// Decodes a work record into a summary for the bookmarked `id`.
///
/// # Errors
///
/// Returns a [`FetchError`] for a failed status, malformed JSON or a record
/// without a title.
pub fn decode_work(id: &str, status: u16, body: &[u8]) -> Result<BookSummary, FetchError> {
    let _span = tracing::debug_span!("decode_work", id = %id, status).entered();

    check_status(status, body)?;

    let work: WorkBody =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    let title = work
        .title
        .ok_or_else(|| FetchError::Decode(format!("work {id} has no title")))?;

    let authors: Vec<String> = work.authors.into_iter().filter_map(|a| a.name).collect();

    Ok(BookSummary {
        authors: (!authors.is_empty()).then_some(authors),
        first_publish_year: work.first_publish_date.as_deref().and_then(parse_year),
        cover_id: work.covers.into_iter().find(|c| *c > 0),
        subjects: work.subjects,
        ..BookSummary::new(id, title)
    })
}

/// First four-digit run in a free-form date such as `"March 1965"` or `"1965-08-01"`.
fn parse_year(date: &str) -> Option<i32> {
    let bytes = date.as_bytes();
    bytes
        .windows(4)
        .enumerate()
        .find(|(i, w)| {
            w.iter().all(u8::is_ascii_digit)
                && (*i == 0 || !bytes[i - 1].is_ascii_digit())
                && bytes.get(i + 4).map_or(true, |b| !b.is_ascii_digit())
        })
        .and_then(|(i, _)| date[i..i + 4].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "numFound": 2,
        "docs": [
            {
                "key": "/works/OL893415W",
                "title": "Dune",
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965,
                "cover_i": 11481354,
                "subject": ["Science fiction", "Dune (Imaginary place)"],
                "language": ["eng", "fre"],
                "publisher": ["Chilton Books"],
                "number_of_pages_median": 608
            },
            { "key": "/works/OL2W", "title": "Sparse" },
            { "title": "No key" }
        ]
    }"#;

    #[test]
    fn search_page_decodes_documents_in_order() {
        let page = decode_search_page(200, SEARCH_BODY.as_bytes()).unwrap();
        assert_eq!(page.num_found, 2);
        assert_eq!(page.books.len(), 2);
        assert!(page.has_more());

        let dune = &page.books[0];
        assert_eq!(dune.id, "/works/OL893415W");
        assert_eq!(dune.primary_author(), "Frank Herbert");
        assert_eq!(dune.cover_id, Some(11_481_354));
        assert_eq!(dune.page_count, Some(608));

        assert_eq!(page.books[1], BookSummary::new("/works/OL2W", "Sparse"));
    }

    #[test]
    fn empty_docs_end_pagination() {
        let page = decode_search_page(200, br#"{"numFound":40,"docs":[]}"#).unwrap();
        assert!(!page.has_more());
    }

    #[test]
    fn keyless_docs_do_not_end_pagination() {
        let page = decode_search_page(200, br#"{"numFound":40,"docs":[{"title":"a"},{"title":"b"}]}"#).unwrap();
        assert!(page.books.is_empty());
        assert_eq!(page.doc_count, 2);
        assert!(page.has_more());
    }

    #[test]
    fn status_and_body_failures_map_to_fetch_errors() {
        assert_eq!(decode_search_page(503, b""), Err(FetchError::Status(503)));
        assert!(matches!(decode_search_page(0, b"dns failure"), Err(FetchError::Transport(m)) if m == "dns failure"));
        assert!(matches!(decode_search_page(200, b"<html>"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn work_record_projects_to_summary() {
        let body = br#"{
            "title": "The Hobbit",
            "authors": [{"author": {"key": "/authors/OL26320A"}}, {"name": "J.R.R. Tolkien"}],
            "covers": [-1, 14627509],
            "first_publish_date": "September 21, 1937",
            "subjects": ["Fantasy"]
        }"#;
        let book = decode_work("/works/OL262758W", 200, body).unwrap();
        assert_eq!(book.id, "/works/OL262758W");
        assert_eq!(book.title, "The Hobbit");
        assert_eq!(book.authors, Some(vec!["J.R.R. Tolkien".to_string()]));
        assert_eq!(book.cover_id, Some(14_627_509));
        assert_eq!(book.first_publish_year, Some(1937));
    }

    #[test]
    fn work_without_title_is_a_decode_error() {
        assert!(matches!(
            decode_work("/works/OL1W", 200, br#"{"covers":[1]}"#),
            Err(FetchError::Decode(_))
        ));
        assert_eq!(decode_work("/works/OL1W", 404, b"{}"), Err(FetchError::Status(404)));
    }

    #[test]
    fn year_is_taken_from_first_four_digit_run() {
        assert_eq!(parse_year("1965"), Some(1965));
        assert_eq!(parse_year("1965-08-01"), Some(1965));
        assert_eq!(parse_year("21 March 2001"), Some(2001));
        assert_eq!(parse_year("12345"), None);
        assert_eq!(parse_year("n.d."), None);
    }
}
