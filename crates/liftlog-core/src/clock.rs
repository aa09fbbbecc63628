//! Wall-clock sources.
//!
//! The rest timer never counts ticks; it asks a [`Clock`] for the current
//! epoch milliseconds and derives everything from the anchor it recorded at
//! start. Swapping in [`ManualClock`] lets tests jump across a suspended
//! screen or a page reload without sleeping.

use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and hand
/// another to the timer.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn at(epoch_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(epoch_ms)),
        }
    }

    pub fn set(&self, epoch_ms: i64) {
        self.now.set(epoch_ms);
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance_ms(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::at(1_000);
        let handle = clock.clone();
        handle.advance_secs(5);
        assert_eq!(clock.now_ms(), 6_000);
        clock.set(42);
        assert_eq!(handle.now_ms(), 42);
    }

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
