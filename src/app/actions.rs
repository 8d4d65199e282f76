//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing user input or host events.
//! Actions bridge pure state transformations and effectful operations like
//! issuing web requests, arming timers or hiding the plugin.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The plugin runtime executes
//! these actions in sequence. A detail batch, for example, yields one
//! [`Action::FetchDetail`] per bookmarked work.
//!
//! # Example
//!
//! ```rust
//! use bookhunt::app::Action;
//!
//! let actions = vec![Action::ScheduleDebounce { token: 1, delay_ms: 500 }];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::catalog::{DetailRequest, PageRequest};

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (e.g., pressing 'q').
    CloseFocus,

    /// Issues a catalog search request for one page.
    FetchPage(PageRequest),

    /// Issues a work lookup for one bookmarked identifier.
    FetchDetail(DetailRequest),

    /// Arms a one-shot timer whose expiry is reported back as
    /// `Event::DebounceElapsed { token }`.
    ScheduleDebounce {
        /// Token to report when the timer fires.
        token: u64,
        /// Delay before firing, in milliseconds.
        delay_ms: u64,
    },
}
