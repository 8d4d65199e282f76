//! Request tags carried through the host's web request context.
//!
//! The host hands back the context map untouched with the response, so every
//! piece of information needed to route and validate the answer is encoded
//! into it: which query epoch and page a search belongs to, or which detail
//! batch slot a work lookup fills.

use super::request::SearchQuery;
use crate::domain::{Genre, Language};
use crate::observability::TraceContext;
use std::collections::BTreeMap;

const KIND: &str = "kind";
const KIND_PAGE: &str = "page";
const KIND_DETAIL: &str = "detail";
const REQUEST_ID: &str = "request_id";
const TEXT: &str = "text";
const GENRE: &str = "genre";
const LANGUAGE: &str = "language";
const PAGE: &str = "page";
const BATCH_ID: &str = "batch_id";
const INDEX: &str = "index";
const ID: &str = "id";
const TRACE_ID: &str = "trace_id";
const PARENT_SPAN_ID: &str = "parent_span_id";

/// Identity of one catalog page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTag {
    /// Monotonic id, unique per issued page request.
    pub request_id: u64,
    /// The epoch the request was issued for.
    pub query: SearchQuery,
    /// 1-based page number.
    pub page: u32,
}

/// Identity of one work lookup within a detail batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTag {
    pub batch_id: u64,
    /// Position of `id` in the batch input.
    pub index: usize,
    pub id: String,
}

/// Tag of any request the plugin issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTag {
    Page(PageTag),
    Detail(DetailTag),
}

impl RequestTag {
    /// Encodes the tag, and the trace context if any, into a request context map.
    #[must_use]
    pub fn to_context(&self, trace: Option<&TraceContext>) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        let mut put = |key: &str, value: String| {
            context.insert(key.to_string(), value);
        };

        match self {
            Self::Page(tag) => {
                put(KIND, KIND_PAGE.to_string());
                put(REQUEST_ID, tag.request_id.to_string());
                put(TEXT, tag.query.text.clone());
                put(GENRE, tag.query.genre.label().to_string());
                put(LANGUAGE, tag.query.language.code().to_string());
                put(PAGE, tag.page.to_string());
            }
            Self::Detail(tag) => {
                put(KIND, KIND_DETAIL.to_string());
                put(BATCH_ID, tag.batch_id.to_string());
                put(INDEX, tag.index.to_string());
                put(ID, tag.id.clone());
            }
        }

        if let Some(trace) = trace {
            put(TRACE_ID, trace.trace_id.clone());
            put(PARENT_SPAN_ID, trace.parent_span_id.clone());
        }

        context
    }

    /// Decodes a context map produced by [`to_context`](Self::to_context).
    ///
    /// Returns `None` for contexts this plugin did not create.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<(Self, Option<TraceContext>)> {
        let get = |key: &str| context.get(key).map(String::as_str);

        let tag = match get(KIND)? {
            KIND_PAGE => Self::Page(PageTag {
                request_id: get(REQUEST_ID)?.parse().ok()?,
                query: SearchQuery {
                    text: get(TEXT)?.to_string(),
                    genre: Genre::from_label(get(GENRE)?)?,
                    language: Language::from_code(get(LANGUAGE)?)?,
                },
                page: get(PAGE)?.parse().ok()?,
            }),
            KIND_DETAIL => Self::Detail(DetailTag {
                batch_id: get(BATCH_ID)?.parse().ok()?,
                index: get(INDEX)?.parse().ok()?,
                id: get(ID)?.to_string(),
            }),
            _ => return None,
        };

        let trace = match (get(TRACE_ID), get(PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.to_string(),
                parent_span_id: parent_span_id.to_string(),
            }),
            _ => None,
        };

        Some((tag, trace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_tag_survives_the_context_map() {
        let tag = RequestTag::Page(PageTag {
            request_id: 7,
            query: SearchQuery::new("the hobbit", Genre::ScienceFiction, Language::from_code("ger").unwrap()),
            page: 3,
        });
        let trace = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
            parent_span_id: "00f067aa0ba902b7".into(),
        };

        let context = tag.to_context(Some(&trace));
        assert_eq!(RequestTag::from_context(&context), Some((tag, Some(trace))));
    }

    #[test]
    fn detail_tag_without_trace() {
        let tag = RequestTag::Detail(DetailTag {
            batch_id: 2,
            index: 1,
            id: "/works/OL1W".into(),
        });
        let context = tag.to_context(None);
        assert_eq!(RequestTag::from_context(&context), Some((tag, None)));
    }

    #[test]
    fn foreign_or_damaged_contexts_are_ignored() {
        assert_eq!(RequestTag::from_context(&BTreeMap::new()), None);

        let mut context = RequestTag::Detail(DetailTag {
            batch_id: 1,
            index: 0,
            id: "x".into(),
        })
        .to_context(None);
        context.insert(INDEX.into(), "minus one".into());
        assert_eq!(RequestTag::from_context(&context), None);
    }
}
