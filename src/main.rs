//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the bookhunt library
//! and the Zellij plugin system. It implements the `ZellijPlugin` trait, maps
//! host events to library events and turns library actions into host calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Host           │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← Event mapping, action execution
//! │  └──────────────────┘   │
//! │     │            ▲      │
//! │     │ web_request│      │
//! │     │ set_timeout│      │
//! │     ▼            │      │
//! │  WebRequestResult/Timer │  ← Answers delivered as events
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `Timer` and permission events
//! 3. **Permission**: Web access granted → page 1 of the popular list is requested
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation, search, filter and bookmark events (mode dependent)
//! - `Timer` → `Event::DebounceElapsed` for the oldest armed debounce token
//! - `WebRequestResult` → `Event::PageLoaded` / `Event::DetailLoaded`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `/`: Enter search mode
//! - `f`: Open the filter panel
//! - `g`/`G`: Next/previous genre
//! - `l`/`L`: Next/previous language
//! - `m`: Load the next page
//! - `Space`/`b`: Toggle bookmark
//! - `Enter`: Open details, `Esc` closes them
//! - `r`: Toggle the reading list
//! - `R`: Retry a failed fetch
//! - `q`: Close plugin
//!
//! In search mode:
//! - Characters: Type into the search box
//! - `Enter`/`Esc`: Leave the search box
//!
//! In the filter panel:
//! - `j`/`k`: Next/previous genre
//! - `l`/`h`: Next/previous language
//! - `Esc`/`f`: Close the panel

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use bookhunt::catalog::{decode_response, RequestTag};
#[cfg(target_family = "wasm")]
use bookhunt::infrastructure::TimerQueue;
#[cfg(target_family = "wasm")]
use bookhunt::observability::TraceContext;
#[cfg(target_family = "wasm")]
use bookhunt::{handle_event, Action, AppState, Config, Event, InputMode};
#[cfg(target_family = "wasm")]
use std::collections::BTreeMap;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
register_plugin!(State);

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like timer
/// bookkeeping.
#[cfg(target_family = "wasm")]
#[derive(Default)]
struct State {
    /// Core application state from library layer, created on load.
    app: Option<AppState>,

    /// Debounce tokens of armed host timers, oldest first.
    timers: TimerQueue,
}

#[cfg(target_family = "wasm")]
impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Called once during plugin startup. Parses configuration, initializes
    /// application state, requests permissions and subscribes to events.
    ///
    /// # Permissions
    ///
    /// Requests:
    /// - `WebAccess`: Query the Open Library catalog
    ///
    /// # Subscriptions
    ///
    /// - `Key`: Keyboard input
    /// - `WebRequestResult`: Catalog answers
    /// - `Timer`: Debounce expiry
    /// - `PermissionRequestResult`: Web access decision
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bookhunt::observability::init_tracing(&config);

        let _span = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(
            genre = %config.genre,
            language = config.language.code(),
            debounce_ms = config.debounce_ms,
            "parsed configuration"
        );
        self.app = Some(bookhunt::initialize(&config));

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to `handle_event`,
    /// and executes resulting actions.
    ///
    /// # Returns
    ///
    /// - `true` if the plugin UI should re-render
    /// - `false` if the event was ignored or resulted in no state changes
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        if let zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) = event {
            return self.handle_web_result(status, &body, &context);
        }

        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => match self.timers.pop() {
                Some(token) => Event::DebounceElapsed { token },
                None => {
                    tracing::debug!("timer fired with no armed debounce");
                    return false;
                }
            },
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                let granted = matches!(status, PermissionStatus::Granted);
                if !granted {
                    tracing::warn!("web access denied - catalog unavailable");
                }
                Event::PermissionsResult { granted }
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Renders the plugin UI.
    ///
    /// Delegates to the library's rendering layer.
    fn render(&mut self, rows: usize, cols: usize) {
        if let Some(app) = &self.app {
            bookhunt::ui::render(app, rows, cols);
        }
    }
}

#[cfg(target_family = "wasm")]
impl State {
    /// Decodes a catalog answer and handles it inside the trace of its request.
    fn handle_web_result(
        &mut self,
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> bool {
        let Some((response, trace)) = decode_response(status, body, context) else {
            tracing::debug!(status, "ignoring web result without a request tag");
            return false;
        };

        let _otel_guard = trace.as_ref().and_then(TraceContext::attach);
        let span = tracing::debug_span!("catalog_response", status, body_len = body.len());
        let _guard = span.entered();

        self.dispatch(&Event::from(response))
    }

    fn dispatch(&mut self, event: &Event) -> bool {
        let Some(app) = self.app.as_mut() else {
            return false;
        };

        match handle_event(app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");
        let app = self.app.as_ref()?;

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        match app.input_mode {
            InputMode::Search => Self::map_search_key(key),
            InputMode::Filters => Self::map_filter_key(key),
            InputMode::Normal => Self::map_normal_key(key, app.detail_open),
        }
    }

    fn map_search_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Enter | BareKey::Esc => Event::ExitSearch,
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_filter_key(key: &KeyWithModifier) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::NextGenre,
            BareKey::Up | BareKey::Char('k') => Event::PrevGenre,
            BareKey::Right | BareKey::Char('l') => Event::NextLanguage,
            BareKey::Left | BareKey::Char('h') => Event::PrevLanguage,
            BareKey::Esc | BareKey::Char('f') => Event::ToggleFilters,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_normal_key(key: &KeyWithModifier, detail_open: bool) -> Option<Event> {
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Esc if detail_open => Event::CloseDetail,
            BareKey::Enter => Event::OpenDetail,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::ToggleFilters,
            BareKey::Char('g') => Event::NextGenre,
            BareKey::Char('G') => Event::PrevGenre,
            BareKey::Char('l') => Event::NextLanguage,
            BareKey::Char('L') => Event::PrevLanguage,
            BareKey::Char('m') => Event::AdvancePage,
            BareKey::Char(' ' | 'b') => Event::ToggleBookmark,
            BareKey::Char('r') => Event::ToggleReadingList,
            BareKey::Char('R') => Event::Retry,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    ///
    /// # Actions
    ///
    /// - `CloseFocus`: Hide plugin pane
    /// - `FetchPage`/`FetchDetail`: Issue a tagged GET request
    /// - `ScheduleDebounce`: Arm a host timer for the token
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchPage(request) => {
                tracing::debug!(url = %request.url, page = request.tag.page, "requesting page");
                let trace = TraceContext::from_current();
                let context = RequestTag::Page(request.tag.clone()).to_context(trace.as_ref());
                web_request(&request.url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
            Action::FetchDetail(request) => {
                tracing::debug!(url = %request.url, index = request.tag.index, "requesting work");
                let trace = TraceContext::from_current();
                let context = RequestTag::Detail(request.tag.clone()).to_context(trace.as_ref());
                web_request(&request.url, HttpVerb::Get, BTreeMap::new(), vec![], context);
            }
            Action::ScheduleDebounce { token, delay_ms } => {
                self.timers.push(*token);
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*delay_ms as f64 / 1000.0);
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("bookhunt is a Zellij plugin; build it for wasm32-wasip1 and load it from a layout");
}
