//! Open Library catalog client plumbing.
//!
//! The plugin never performs I/O itself: it describes requests
//! ([`PageRequest`], [`DetailRequest`]) that the Zellij shim issues through
//! the host, and decodes the host's answers back into typed results. Each
//! request carries a [`RequestTag`] in the host context so that answers can be
//! matched to the state that asked for them.
//!
//! # Modules
//!
//! - [`request`]: Query terms and URL construction
//! - [`response`]: Lenient JSON decoding and status mapping
//! - [`tag`]: Request identity encoded into the host context map

pub mod request;
pub mod response;
pub mod tag;

pub use request::{
    cover_url, work_url, DetailRequest, PageRequest, SearchQuery, API_BASE, DEFAULT_TERM,
    PAGE_SIZE, PLACEHOLDER_COVER_URL,
};
pub use response::{decode_search_page, decode_work, SearchPage};
pub use tag::{DetailTag, PageTag, RequestTag};

use crate::domain::{BookSummary, FetchError};
use crate::observability::TraceContext;
use std::collections::BTreeMap;

/// A decoded answer to one of the plugin's requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogResponse {
    Page {
        tag: PageTag,
        result: Result<SearchPage, FetchError>,
    },
    Detail {
        tag: DetailTag,
        result: Result<BookSummary, FetchError>,
    },
}

/// Decodes a host web request result.
///
/// Returns `None` if the context does not carry one of this plugin's tags.
/// The trace context of the issuing span is returned alongside so the caller
/// can parent its handling spans to it.
#[must_use]
pub fn decode_response(
    status: u16,
    body: &[u8],
    context: &BTreeMap<String, String>,
) -> Option<(CatalogResponse, Option<TraceContext>)> {
    let (tag, trace) = RequestTag::from_context(context)?;

    let response = match tag {
        RequestTag::Page(tag) => CatalogResponse::Page {
            result: decode_search_page(status, body),
            tag,
        },
        RequestTag::Detail(tag) => CatalogResponse::Detail {
            result: decode_work(&tag.id, status, body),
            tag,
        },
    };

    Some((response, trace))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_results_are_ignored() {
        assert_eq!(decode_response(200, b"{}", &BTreeMap::new()), None);
    }

    #[test]
    fn detail_results_are_decoded_for_their_id() {
        let tag = DetailTag {
            batch_id: 4,
            index: 0,
            id: "/works/OL1W".into(),
        };
        let context = RequestTag::Detail(tag.clone()).to_context(None);

        let (response, trace) = decode_response(200, br#"{"title":"T"}"#, &context).unwrap();
        assert_eq!(trace, None);
        assert_eq!(
            response,
            CatalogResponse::Detail {
                tag,
                result: Ok(BookSummary::new("/works/OL1W", "T")),
            }
        );
    }
}
