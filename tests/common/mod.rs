//! In-process stand-in for the Zellij host.
//!
//! Collects the requests and timers the state machine asks for and feeds
//! answers back through the same decode path the plugin uses.

#![allow(dead_code)]

use bookhunt::catalog::{decode_response, RequestTag};
use bookhunt::infrastructure::TimerQueue;
use bookhunt::storage::{BookmarkStore, KeyValueStore, MemoryStorage};
use bookhunt::{handle_event, Action, AppState, Event, Theme};
use serde_json::json;
use std::collections::BTreeMap;

/// A web request the host has not answered yet.
#[derive(Debug, Clone)]
pub struct Pending {
    pub url: String,
    pub context: BTreeMap<String, String>,
}

pub struct Host {
    pub state: AppState,
    pub pending: Vec<Pending>,
    pub timers: TimerQueue,
}

impl Host {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            state: AppState::new(BookmarkStore::open(backend), Theme::default()),
            pending: Vec::new(),
            timers: TimerQueue::new(),
        }
    }

    /// A host that already granted web access; the popular page 1 request is pending.
    pub fn granted() -> Self {
        let mut host = Self::new(Box::new(MemoryStorage::new()));
        host.send(Event::PermissionsResult { granted: true });
        assert_eq!(host.pending.len(), 1);
        host
    }

    pub fn send(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event).unwrap();
        for action in actions {
            match action {
                Action::FetchPage(request) => self.pending.push(Pending {
                    url: request.url,
                    context: RequestTag::Page(request.tag).to_context(None),
                }),
                Action::FetchDetail(request) => self.pending.push(Pending {
                    url: request.url,
                    context: RequestTag::Detail(request.tag).to_context(None),
                }),
                Action::ScheduleDebounce { token, .. } => self.timers.push(token),
                Action::CloseFocus => {}
            }
        }
        render
    }

    /// Fires the oldest armed timer.
    pub fn fire_timer(&mut self) -> bool {
        let token = self.timers.pop().expect("no timer armed");
        self.send(Event::DebounceElapsed { token })
    }

    /// Types `text` as a replacement of the search box and lets the debounce elapse.
    pub fn commit_text(&mut self, text: &str) {
        self.send(Event::SetSearchText(text.to_string()));
        while !self.timers.is_empty() {
            self.fire_timer();
        }
    }

    /// Answers the pending request at `index`.
    pub fn respond(&mut self, index: usize, status: u16, body: &str) -> bool {
        let request = self.pending.remove(index);
        let (response, _trace) =
            decode_response(status, body.as_bytes(), &request.context).expect("tagged request");
        self.send(Event::from(response))
    }

    /// Answers the pending request whose URL contains `needle`.
    pub fn respond_to(&mut self, needle: &str, status: u16, body: &str) -> bool {
        let index = self
            .pending
            .iter()
            .position(|p| p.url.contains(needle))
            .unwrap_or_else(|| panic!("no pending request matching {needle}: {:?}", self.pending));
        self.respond(index, status, body)
    }

    pub fn titles(&self) -> Vec<String> {
        self.state
            .visible_books()
            .iter()
            .map(|book| book.title.clone())
            .collect()
    }
}

/// A search response body with `count` docs titled `"{prefix} {i}"`.
pub fn search_body(prefix: &str, count: usize, num_found: u64) -> String {
    let docs: Vec<_> = (0..count)
        .map(|i| {
            json!({
                "key": format!("/works/OL{prefix}{i}W"),
                "title": format!("{prefix} {i}"),
                "author_name": ["Frank Herbert"],
                "first_publish_year": 1965,
                "subject": ["Science fiction"],
            })
        })
        .collect();
    json!({ "numFound": num_found, "docs": docs }).to_string()
}

/// A work record body.
pub fn work_body(title: &str) -> String {
    json!({
        "title": title,
        "authors": [{ "name": "Ursula K. Le Guin" }],
        "covers": [8_231_856],
        "first_publish_date": "1969",
    })
    .to_string()
}
