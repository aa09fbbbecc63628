use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerSnapshot;

/// Every rest timer state change produces an Event.
/// The CLI prints them; the page reacts to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u32,
        started_at_ms: i64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown hit zero while running; the completion signal fired.
    TimerExpired {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    /// Persisted state was hydrated on load.
    /// `running == false` means the countdown had already finished while the
    /// page was gone; no completion signal is fired for it.
    TimerRestored {
        running: bool,
        remaining_secs: u32,
        started_at_ms: i64,
        at: DateTime<Utc>,
    },
    DurationChanged {
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot(TimerSnapshot),
}
