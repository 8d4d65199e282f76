//! Domain layer for the bookhunt plugin.
//!
//! This module contains the core domain types for the plugin, independent of
//! Zellij-specific APIs, HTTP plumbing or persistence.
//!
//! # Organization
//!
//! - [`book`]: The book summary record and its display fallbacks
//! - [`error`]: Error types and result aliases
//! - [`filters`]: Closed genre and language filter sets
//!
//! # Examples
//!
//! ```
//! use bookhunt::domain::{BookSummary, Genre, Language};
//!
//! let book = BookSummary::new("/works/OL27448W", "The Lord of the Rings");
//! assert_eq!(book.authors_display(), "Unknown Author");
//! assert_eq!(Genre::default(), Genre::All);
//! assert_eq!(Language::default().code(), "eng");
//! ```

pub mod book;
pub mod error;
pub mod filters;

pub use book::BookSummary;
pub use error::{BookhuntError, FetchError, Result};
pub use filters::{language_display_name, Genre, Language};
