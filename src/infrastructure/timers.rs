//! Identity for host timers.
//!
//! Zellij reports an expired `set_timeout` as a bare `Timer` event. Debounce
//! timers all share one delay, so they expire in the order they were armed;
//! a FIFO of the tokens they were armed with recovers which one fired.

use std::collections::VecDeque;

/// Tokens of armed timers, oldest first.
#[derive(Debug, Default)]
pub struct TimerQueue {
    tokens: VecDeque<u64>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a newly armed timer.
    pub fn push(&mut self, token: u64) {
        self.tokens.push_back(token);
    }

    /// Token of the timer that just fired, or `None` for a timer this queue
    /// did not arm.
    pub fn pop(&mut self) -> Option<u64> {
        self.tokens.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timers_fire_in_arming_order() {
        let mut queue = TimerQueue::new();
        queue.push(3);
        queue.push(4);

        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(4));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }
}
