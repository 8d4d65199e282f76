//! Token-based debouncing of search text commits.
//!
//! Every keystroke schedules a new timer and invalidates the previous one. The
//! host delivers every timer, stale ones included, so each carries a token and
//! only the most recently issued token may commit.

use std::time::Duration;

/// Default quiet period before search text is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Issues debounce tokens and recognises the one that is still current.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    next_token: u64,
    pending: Option<u64>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_token: 1,
            pending: None,
        }
    }

    /// The quiet period each scheduled timer waits for.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Issues a new token, superseding any pending one.
    pub fn schedule(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.pending = Some(token);
        token
    }

    /// Consumes `token` if it is the pending one.
    ///
    /// # Returns
    ///
    /// `true` exactly once for the latest scheduled token; `false` for
    /// superseded or already fired tokens.
    pub fn fire(&mut self, token: u64) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Drops the pending token so that no timer commits.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_token_fires() {
        let mut debouncer = Debouncer::default();
        let first = debouncer.schedule();
        let second = debouncer.schedule();

        assert!(!debouncer.fire(first));
        assert!(debouncer.is_pending());
        assert!(debouncer.fire(second));
        assert!(!debouncer.fire(second));
    }

    #[test]
    fn cancel_discards_the_pending_token() {
        let mut debouncer = Debouncer::default();
        let token = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.fire(token));
    }
}
