//! Reading-list detail batches.
//!
//! Opening the reading list issues one work lookup per bookmarked identifier,
//! all at once. A [`DetailBatch`] collects the answers into slots indexed by
//! input position and yields the assembled list once every slot is filled.
//! Failed lookups are omitted from the result.

use crate::catalog::{DetailRequest, DetailTag};
use crate::domain::{BookSummary, FetchError};

/// One outstanding round of work lookups.
#[derive(Debug, Clone)]
pub struct DetailBatch {
    batch_id: u64,
    ids: Vec<String>,
    slots: Vec<Option<Result<BookSummary, FetchError>>>,
}

impl DetailBatch {
    #[must_use]
    pub fn new(batch_id: u64, ids: Vec<String>) -> Self {
        let slots = vec![None; ids.len()];
        Self {
            batch_id,
            ids,
            slots,
        }
    }

    #[must_use]
    pub const fn batch_id(&self) -> u64 {
        self.batch_id
    }

    /// One request per identifier, in input order.
    #[must_use]
    pub fn requests(&self) -> Vec<DetailRequest> {
        self.ids
            .iter()
            .enumerate()
            .map(|(index, id)| {
                DetailRequest::new(DetailTag {
                    batch_id: self.batch_id,
                    index,
                    id: id.clone(),
                })
            })
            .collect()
    }

    /// Stores the answer for one lookup.
    ///
    /// # Returns
    ///
    /// `false` if the tag belongs to another batch, does not match the
    /// identifier at its index, or the slot was already filled.
    pub fn record(&mut self, tag: &DetailTag, result: Result<BookSummary, FetchError>) -> bool {
        if tag.batch_id != self.batch_id || self.ids.get(tag.index) != Some(&tag.id) {
            return false;
        }
        match self.slots.get_mut(tag.index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(result);
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// Successful lookups in input order. Failures and missing answers are skipped.
    #[must_use]
    pub fn into_details(self) -> Vec<BookSummary> {
        self.slots
            .into_iter()
            .filter_map(|slot| slot.and_then(Result::ok))
            .collect()
    }

    /// Number of failed lookups recorded so far.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Some(Err(_))))
            .count()
    }
}

/// The derived reading-list view: assembled details plus the batch in progress.
#[derive(Debug, Clone, Default)]
pub struct ReadingList {
    books: Vec<BookSummary>,
    batch: Option<DetailBatch>,
    next_batch_id: u64,
}

impl ReadingList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Details from the last completed batch, in bookmark order.
    #[must_use]
    pub fn books(&self) -> &[BookSummary] {
        &self.books
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.batch.is_some()
    }

    /// Lookups still outstanding in the current batch.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.batch.as_ref().map_or(0, DetailBatch::pending)
    }

    /// Starts a new batch for `ids`, superseding any batch in progress.
    ///
    /// An empty `ids` completes immediately with an empty list.
    pub fn start(&mut self, ids: &[String]) -> Vec<DetailRequest> {
        self.next_batch_id += 1;
        let _span = tracing::debug_span!("reading_list_start", batch_id = self.next_batch_id, count = ids.len()).entered();

        if ids.is_empty() {
            self.books.clear();
            self.batch = None;
            return Vec::new();
        }

        let batch = DetailBatch::new(self.next_batch_id, ids.to_vec());
        let requests = batch.requests();
        self.batch = Some(batch);
        requests
    }

    /// Records one lookup answer.
    ///
    /// # Returns
    ///
    /// `true` if the answer completed the current batch and the list was replaced.
    pub fn record(&mut self, tag: &DetailTag, result: Result<BookSummary, FetchError>) -> bool {
        let Some(batch) = self.batch.as_mut() else {
            tracing::debug!(batch_id = tag.batch_id, "no batch in progress, discarding detail");
            return false;
        };

        if let Err(e) = &result {
            tracing::warn!(id = %tag.id, error = %e, "work lookup failed");
        }

        if !batch.record(tag, result) {
            tracing::debug!(batch_id = tag.batch_id, index = tag.index, "discarding stale detail");
            return false;
        }

        if !batch.is_complete() {
            return false;
        }

        if let Some(done) = self.batch.take() {
            tracing::debug!(failures = done.failures(), "reading list batch complete");
            self.books = done.into_details();
        }
        true
    }

    /// Drops the batch in progress; late answers will be discarded.
    pub fn abandon(&mut self) {
        self.batch = None;
    }

    /// Removes a book from the displayed list without waiting for a new batch.
    pub fn remove(&mut self, id: &str) {
        self.books.retain(|book| book.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(batch_id: u64, index: usize, id: &str) -> DetailTag {
        DetailTag {
            batch_id,
            index,
            id: id.into(),
        }
    }

    #[test]
    fn partial_failure_keeps_input_order() {
        let ids = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut batch = DetailBatch::new(1, ids);

        assert!(batch.record(&tag(1, 2, "C"), Ok(BookSummary::new("C", "c"))));
        assert!(batch.record(&tag(1, 1, "B"), Err(FetchError::Status(404))));
        assert!(!batch.is_complete());
        assert!(batch.record(&tag(1, 0, "A"), Ok(BookSummary::new("A", "a"))));

        assert!(batch.is_complete());
        assert_eq!(batch.failures(), 1);
        let ids: Vec<String> = batch.into_details().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, ["A", "C"]);
    }

    #[test]
    fn foreign_and_duplicate_answers_are_rejected() {
        let mut batch = DetailBatch::new(2, vec!["A".to_string()]);
        assert!(!batch.record(&tag(1, 0, "A"), Ok(BookSummary::new("A", "a"))));
        assert!(!batch.record(&tag(2, 0, "Z"), Ok(BookSummary::new("Z", "z"))));
        assert!(!batch.record(&tag(2, 5, "A"), Ok(BookSummary::new("A", "a"))));
        assert!(batch.record(&tag(2, 0, "A"), Ok(BookSummary::new("A", "a"))));
        assert!(!batch.record(&tag(2, 0, "A"), Err(FetchError::Status(500))));
    }

    #[test]
    fn reading_list_replaces_books_when_batch_completes() {
        let mut list = ReadingList::new();
        let requests = list.start(&["A".to_string(), "B".to_string()]);
        assert!(list.is_loading());

        assert!(!list.record(&requests[0].tag, Ok(BookSummary::new("A", "a"))));
        assert_eq!(list.pending(), 1);
        assert!(list.record(&requests[1].tag, Ok(BookSummary::new("B", "b"))));

        assert!(!list.is_loading());
        assert_eq!(list.books().len(), 2);
    }

    #[test]
    fn superseded_batch_answers_are_ignored() {
        let mut list = ReadingList::new();
        let old = list.start(&["A".to_string()]);
        let new = list.start(&["B".to_string()]);

        assert!(!list.record(&old[0].tag, Ok(BookSummary::new("A", "a"))));
        assert!(list.record(&new[0].tag, Ok(BookSummary::new("B", "b"))));
        assert_eq!(list.books()[0].id, "B");
    }

    #[test]
    fn empty_reading_list_needs_no_requests() {
        let mut list = ReadingList::new();
        assert!(list.start(&[]).is_empty());
        assert!(!list.is_loading());
        assert!(list.books().is_empty());
    }

    #[test]
    fn requests_cover_every_id() {
        let batch = DetailBatch::new(3, vec!["/works/OL1W".to_string(), "/works/OL2W".to_string()]);
        let requests = batch.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].tag.index, 1);
        assert_eq!(requests[1].url, "https://openlibrary.org/works/OL2W.json");
    }
}
