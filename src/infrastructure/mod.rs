//! Infrastructure layer for filesystem and host interactions.
//!
//! This module provides utilities for working with the Zellij plugin sandbox
//! environment: path handling where the host filesystem is mounted under
//! `/host`, and bookkeeping for host timers that carry no identity.

pub mod paths;
pub mod timers;

pub use paths::{expand_tilde, get_data_dir, DEFAULT_DATA_DIR};
pub use timers::TimerQueue;
