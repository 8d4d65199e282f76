//! Bookhunt: A Zellij plugin for discovering books in the Open Library catalog.
//!
//! Bookhunt is a terminal multiplexer plugin that provides:
//! - Debounced free-text search with genre and language filters
//! - Incremental pagination that loads more results as you scroll
//! - A persistent reading list of bookmarked works
//! - A detail view with authors, publication data, subjects and cover link
//! - Stale-response protection: answers to abandoned queries are never shown

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, query epochs, debouncing         │  ← Business logic
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Catalog Layer │
//! │ (ui/)         │   │ (storage/)    │   │ (catalog/)    │
//! │ - Rendering   │   │ - JSON I/O    │   │ - Query URLs  │
//! │ - Theming     │   │ - Bookmarks   │   │ - Decoding    │
//! │ - Components  │   │ - Backend API │   │ - Request tags│
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths, timer identity (infrastructure/)  │
//! │  - Error types (domain/error)                       │
//! │  - Book model, genres, languages (domain/)          │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`catalog`]: Open Library request construction and response decoding
//! - [`domain`]: Core domain types (books, filters, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths, timers)
//! - [`storage`]: Key-value persistence and the reading list
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookhunt.wasm" {
//!         debounce_ms "400"
//!         language "ger"
//!         genre "Fantasy"
//!         data_dir "~/.local/share/zellij/bookhunt"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Plugin Load** (`main.rs`):
//!    - Parse configuration from Zellij
//!    - Initialize tracing (optional)
//!    - Load the theme and the reading list, create `AppState`
//!    - Request web access and subscribe to Zellij events
//!
//! 2. **Permission Granted**:
//!    - Issue the page 1 request of the popular list
//!
//! 3. **Catalog Round Trips**:
//!    - Each request carries its tag in the web request context
//!    - Answers are decoded, matched to the in-flight request and applied
//!
//! 4. **UI Rendering**:
//!    - Compute view model from state
//!    - Render components (header, search, filters, table, status, footer)
//!
//! # Examples
//!
//! ```rust
//! use bookhunt::{handle_event, Action, AppState, Event};
//! use bookhunt::storage::{BookmarkStore, MemoryStorage};
//! use bookhunt::ui::Theme;
//!
//! let mut state = AppState::new(BookmarkStore::open(Box::new(MemoryStorage::new())), Theme::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! let Some(Action::FetchPage(request)) = actions.first() else { unreachable!() };
//! assert!(request.url.starts_with("https://openlibrary.org/search.json?q=popular"));
//! # Ok::<(), bookhunt::BookhuntError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Query Epochs
//!
//! The committed query (text, genre, language) identifies an epoch. Every
//! request is tagged with its epoch and a request id; a response is applied
//! only if it answers the in-flight request of the current epoch.
//!
//! ## Host-Driven I/O
//!
//! The library never performs network I/O. It emits actions that the shim
//! turns into Zellij web requests and timers, and consumes the decoded
//! results as events. All state transitions are therefore testable natively.
//!
//! # Platform Support
//!
//! - **Target**: `wasm32-wasip1` (Zellij WASM runtime)
//! - **Terminal**: Any ANSI-capable terminal emulator with 24-bit color

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewMode};
pub use domain::{BookSummary, BookhuntError, FetchError, Genre, Language, Result};
pub use ui::Theme;

use app::{Debouncer, QueryController, DEFAULT_DEBOUNCE};
use infrastructure::get_data_dir;
use std::collections::BTreeMap;
use std::time::Duration;
use storage::{BookmarkStore, JsonStorage, KeyValueStore, MemoryStorage, STORAGE_FILE_NAME};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
///
/// # Example
///
/// ```kdl
/// plugin location="file:/path/to/bookhunt.wasm" {
///     debounce_ms "500"
///     language "eng"
///     genre "Science Fiction"
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Quiet period before search text is committed, in milliseconds.
    ///
    /// Default: 500
    pub debounce_ms: u64,

    /// Initial language filter, as an ISO 639-2/B code. Default: `eng`
    pub language: Language,

    /// Initial genre filter, by display label. Default: `All`
    pub genre: Genre,

    /// Directory holding `bookhunt.json` and trace files.
    ///
    /// `~` maps to the sandbox `/host`. Default: `~/.local/share/zellij/bookhunt`
    pub data_dir: Option<String>,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter directive for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Values that were rejected and replaced by their defaults.
    ///
    /// Parsing runs before tracing is up, so these are logged by
    /// [`initialize`].
    pub issues: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: duration_millis(DEFAULT_DEBOUNCE),
            language: Language::default(),
            genre: Genre::default(),
            data_dir: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
            issues: Vec::new(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `debounce_ms`: String → `u64` (default on parse error)
    /// - `language`: supported language code → [`Language`] (default if unknown)
    /// - `genre`: genre label, case-insensitive → [`Genre`] (default if unknown)
    /// - `data_dir`, `theme`, `theme_file`, `trace_level`: String → `Option<String>`
    ///
    /// Rejected values are recorded in [`Config::issues`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookhunt::{Config, Genre};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("genre".to_string(), "fantasy".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.genre, Genre::Fantasy);
    /// assert_eq!(config.debounce_ms, 500);
    /// assert_eq!(config.issues.len(), 1);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let mut issues = Vec::new();

        let debounce_ms = match config.get("debounce_ms") {
            None => defaults.debounce_ms,
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                issues.push(
                    BookhuntError::Config(format!("invalid debounce_ms {raw:?}, using default"))
                        .to_string(),
                );
                defaults.debounce_ms
            }),
        };

        let language = match config.get("language") {
            None => defaults.language,
            Some(raw) => Language::from_code(raw).unwrap_or_else(|| {
                issues.push(
                    BookhuntError::Config(format!("unsupported language {raw:?}, using default"))
                        .to_string(),
                );
                defaults.language
            }),
        };

        let genre = match config.get("genre") {
            None => defaults.genre,
            Some(raw) => Genre::from_label(raw).unwrap_or_else(|| {
                issues.push(
                    BookhuntError::Config(format!("unknown genre {raw:?}, using default"))
                        .to_string(),
                );
                defaults.genre
            }),
        };

        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            debounce_ms,
            language,
            genre,
            data_dir: text("data_dir"),
            theme_name: text("theme"),
            theme_file: text("theme_file"),
            trace_level: text("trace_level"),
            issues,
        }
    }

    /// The debounce window as a [`Duration`].
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Initializes the plugin with configuration.
///
/// Creates a new `AppState` with:
/// - Loaded theme (from file, name, or default)
/// - The persisted reading list, or an empty one if the data directory is
///   unusable (bookmarks then last for the session only)
/// - Initial filters and debounce window from `config`
///
/// # Parameters
///
/// * `config` - Plugin configuration
///
/// # Side Effects
///
/// - Logs configuration issues
/// - Creates data directory if it doesn't exist
///
/// # Example
///
/// ```rust,no_run
/// use bookhunt::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.fetch_deferred);
/// ```
pub fn initialize(config: &Config) -> AppState {
    let _span = tracing::debug_span!("initialize").entered();

    for issue in &config.issues {
        tracing::warn!(issue = %issue, "configuration value ignored");
    }

    let theme = load_theme(config);

    let storage_path = get_data_dir(config.data_dir.as_deref()).join(STORAGE_FILE_NAME);
    let backend: Box<dyn KeyValueStore> = match JsonStorage::open_or_reset(storage_path) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!(error = %e, "data directory unavailable, reading list will not persist");
            Box::new(MemoryStorage::new())
        }
    };
    let bookmarks = BookmarkStore::open(backend);

    tracing::debug!(
        bookmarks = bookmarks.len(),
        genre = %config.genre,
        language = config.language.code(),
        debounce_ms = config.debounce_ms,
        "bookhunt initialized"
    );

    AppState::new(bookmarks, theme).with_query(
        QueryController::new(config.genre, config.language),
        Debouncer::new(config.debounce()),
    )
}

fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        return Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn valid_values_are_parsed() {
        let config = Config::from_zellij(&map(&[
            ("debounce_ms", "250"),
            ("language", "fre"),
            ("genre", "Mystery"),
            ("data_dir", "~/books"),
            ("theme", "catppuccin-latte"),
            ("trace_level", "debug"),
        ]));

        assert_eq!(config.debounce(), Duration::from_millis(250));
        assert_eq!(config.language.code(), "fre");
        assert_eq!(config.genre, Genre::Mystery);
        assert_eq!(config.data_dir.as_deref(), Some("~/books"));
        assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert!(config.issues.is_empty());
    }

    #[test]
    fn invalid_values_fall_back_and_are_reported() {
        let config = Config::from_zellij(&map(&[
            ("debounce_ms", "-5"),
            ("language", "klingon"),
            ("genre", "Cookbooks"),
            ("theme", "   "),
        ]));

        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.language, Language::ENGLISH);
        assert_eq!(config.genre, Genre::All);
        assert_eq!(config.theme_name, None);
        assert_eq!(config.issues.len(), 3);
    }

    #[test]
    fn unknown_theme_uses_default() {
        let config = Config {
            theme_name: Some("nope".to_string()),
            ..Config::default()
        };
        assert_eq!(load_theme(&config).name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_uses_configured_filters() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            genre: Genre::Poetry,
            data_dir: dir.path().to_str().map(String::from),
            ..Config::default()
        };

        let state = initialize(&config);
        assert_eq!(state.query.genre(), Genre::Poetry);
        assert!(state.bookmarks.is_empty());
        assert!(state.fetch_deferred);
    }
}
