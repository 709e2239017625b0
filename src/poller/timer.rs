//! Repeating poll timer.
//!
//! The timer is a deadline the actor loop sleeps towards rather than a live
//! `Interval`, so the loop can re-read it after every event without holding
//! a borrow across `select!` branches. Dropping the value cancels it.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug)]
pub(crate) struct PollingTimer {
    /// Unique per created timer; lets callers tell a kept timer from a new one.
    generation: u64,
    period: Duration,
    next_fire: Instant,
}

impl PollingTimer {
    /// Start a timer whose first tick is one full period away.
    pub(crate) fn start(generation: u64, period: Duration) -> Self {
        Self {
            generation,
            period,
            next_fire: Instant::now() + period,
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn deadline(&self) -> Instant {
        self.next_fire
    }

    /// Schedule the next tick one period after now. Late ticks are delayed,
    /// never bunched.
    pub(crate) fn advance(&mut self) {
        self.next_fire = Instant::now() + self.period;
    }
}
