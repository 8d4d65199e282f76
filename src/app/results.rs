//! Result accumulator for the current query epoch.
//!
//! The accumulator owns the growing result list and the single in-flight page
//! request. A response is applied only if it answers exactly the request that
//! is in flight *and* that request was issued for the current epoch; anything
//! else is a late answer to an abandoned query and is dropped.

use crate::catalog::{PageTag, SearchPage, SearchQuery};
use crate::domain::{BookSummary, FetchError};

/// What happened to a page response handed to [`ResultAccumulator::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Page 1 replaced the list.
    Replaced,
    /// A later page was appended.
    Appended,
    /// The fetch failed; items and `has_more` are unchanged.
    Failed,
    /// The response belonged to another request or epoch and was discarded.
    Stale,
}

/// Items of the current epoch plus in-flight bookkeeping.
#[derive(Debug, Clone)]
pub struct ResultAccumulator {
    items: Vec<BookSummary>,
    has_more: bool,
    num_found: u64,
    in_flight: Option<PageTag>,
    next_request_id: u64,
    last_error: Option<(u32, FetchError)>,
}

impl ResultAccumulator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            has_more: true,
            num_found: 0,
            in_flight: None,
            next_request_id: 1,
            last_error: None,
        }
    }

    /// Items in API relevance order, page 1 first.
    #[must_use]
    pub fn items(&self) -> &[BookSummary] {
        &self.items
    }

    /// Whether the last page was non-empty.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Total hits reported for the epoch by the last applied page.
    #[must_use]
    pub const fn num_found(&self) -> u64 {
        self.num_found
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<&PageTag> {
        self.in_flight.as_ref()
    }

    /// The error of the last failed fetch, if it has not been superseded.
    #[must_use]
    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref().map(|(_, e)| e)
    }

    /// Page number whose fetch failed last, if any.
    #[must_use]
    pub fn failed_page(&self) -> Option<u32> {
        self.last_error.as_ref().map(|(page, _)| *page)
    }

    /// Starts a new epoch: clears items and forgets the in-flight request.
    ///
    /// A response to the forgotten request will be discarded on arrival.
    pub fn reset(&mut self) {
        if let Some(tag) = self.in_flight.take() {
            tracing::debug!(request_id = tag.request_id, "superseding in-flight request");
        }
        self.items.clear();
        self.has_more = true;
        self.num_found = 0;
        self.last_error = None;
    }

    /// Registers a new in-flight request for `page` of `query`.
    ///
    /// # Returns
    ///
    /// The tag identifying the request, or `None` if another request is
    /// already in flight.
    pub fn begin(&mut self, query: &SearchQuery, page: u32) -> Option<PageTag> {
        if let Some(current) = &self.in_flight {
            tracing::debug!(
                in_flight = current.request_id,
                requested_page = page,
                "fetch already in flight, dropping trigger"
            );
            return None;
        }

        let tag = PageTag {
            request_id: self.next_request_id,
            query: query.clone(),
            page,
        };
        self.next_request_id += 1;
        self.in_flight = Some(tag.clone());
        Some(tag)
    }

    /// Applies a page response.
    ///
    /// # Parameters
    ///
    /// * `tag` - Tag the response was issued with
    /// * `result` - Decoded page or the fetch error
    /// * `current` - The current epoch
    pub fn apply(
        &mut self,
        tag: &PageTag,
        result: Result<SearchPage, FetchError>,
        current: &SearchQuery,
    ) -> ApplyOutcome {
        let _span = tracing::debug_span!(
            "apply_page",
            request_id = tag.request_id,
            page = tag.page
        )
        .entered();

        if self.in_flight.as_ref() != Some(tag) || &tag.query != current {
            tracing::debug!(
                expected = ?self.in_flight.as_ref().map(|t| t.request_id),
                "discarding stale page response"
            );
            return ApplyOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) => {
                self.has_more = page.has_more();
                self.num_found = page.num_found;
                self.last_error = None;

                if tag.page == 1 {
                    self.items = page.books;
                    tracing::debug!(count = self.items.len(), "results replaced");
                    ApplyOutcome::Replaced
                } else {
                    self.items.extend(page.books);
                    tracing::debug!(count = self.items.len(), "results appended");
                    ApplyOutcome::Appended
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, page = tag.page, "page fetch failed");
                self.last_error = Some((tag.page, e));
                ApplyOutcome::Failed
            }
        }
    }
}

impl Default for ResultAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Genre, Language};

    fn page_of(prefix: &str, n: usize) -> SearchPage {
        SearchPage::new(
            (0..n)
                .map(|i| BookSummary::new(format!("/works/{prefix}{i}"), format!("{prefix} {i}")))
                .collect(),
            100,
        )
    }

    fn query(text: &str) -> SearchQuery {
        SearchQuery::new(text, Genre::All, Language::ENGLISH)
    }

    #[test]
    fn second_page_appends_after_first() {
        let q = query("dune");
        let mut results = ResultAccumulator::new();

        let first = results.begin(&q, 1).unwrap();
        assert_eq!(results.apply(&first, Ok(page_of("a", 20)), &q), ApplyOutcome::Replaced);

        let second = results.begin(&q, 2).unwrap();
        assert_eq!(results.apply(&second, Ok(page_of("b", 5)), &q), ApplyOutcome::Appended);

        assert_eq!(results.items().len(), 25);
        assert_eq!(results.items()[0].id, "/works/a0");
        assert_eq!(results.items()[20].id, "/works/b0");
        assert!(results.has_more());
    }

    #[test]
    fn only_one_request_in_flight() {
        let q = query("dune");
        let mut results = ResultAccumulator::new();
        assert!(results.begin(&q, 1).is_some());
        assert!(results.begin(&q, 2).is_none());
    }

    #[test]
    fn superseded_response_is_discarded() {
        let dune = query("dune");
        let hobbit = query("hobbit");
        let mut results = ResultAccumulator::new();

        let old = results.begin(&dune, 1).unwrap();
        results.reset();
        let new = results.begin(&hobbit, 1).unwrap();

        assert_eq!(results.apply(&old, Ok(page_of("d", 20)), &hobbit), ApplyOutcome::Stale);
        assert!(results.items().is_empty());
        assert!(results.is_loading());

        assert_eq!(results.apply(&new, Ok(page_of("h", 3)), &hobbit), ApplyOutcome::Replaced);
        assert_eq!(results.items()[0].id, "/works/h0");
    }

    #[test]
    fn failure_keeps_items_and_records_error() {
        let q = query("dune");
        let mut results = ResultAccumulator::new();
        let first = results.begin(&q, 1).unwrap();
        results.apply(&first, Ok(page_of("a", 20)), &q);

        let second = results.begin(&q, 2).unwrap();
        let outcome = results.apply(&second, Err(FetchError::Status(500)), &q);

        assert_eq!(outcome, ApplyOutcome::Failed);
        assert_eq!(results.items().len(), 20);
        assert!(results.has_more());
        assert!(!results.is_loading());
        assert_eq!(results.failed_page(), Some(2));
        assert_eq!(results.last_error(), Some(&FetchError::Status(500)));
    }

    #[test]
    fn empty_page_ends_pagination() {
        let q = query("dune");
        let mut results = ResultAccumulator::new();
        let first = results.begin(&q, 1).unwrap();
        results.apply(&first, Ok(page_of("a", 0)), &q);
        assert!(!results.has_more());
    }
}
