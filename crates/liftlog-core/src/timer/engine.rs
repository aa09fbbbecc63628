//! Rest timer implementation.
//!
//! The rest timer is a wall-clock-anchored state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` with the
//! id of the active [`Ticker`] roughly once per period.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (pause | reset) -> Idle
//!         Running -> Expired -> Idle        (remaining hit zero)
//! ```
//!
//! Remaining time is always `duration - elapsed since anchor`, never a
//! decremented counter, so missed ticks (a sleeping phone, a background tab)
//! cost nothing. While running, the anchor is written to the running-state
//! slot after every recomputation; a fresh instance calls [`RestTimer::restore`]
//! to pick the countdown back up.
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = RestTimer::new(store, SystemClock, Box::new(LogNotifier));
//! timer.restore();
//! timer.start();
//! // Once per second:
//! if let Some(ticker) = timer.ticker() {
//!     timer.tick(ticker.id()); // Returns Some(Event::TimerExpired) at zero
//! }
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::display::{format_clock, UrgencyTier};
use crate::clock::{Clock, SystemClock};
use crate::events::Event;
use crate::notify::{self, CompletionNotice, Notifier};
use crate::storage::slots::{self, TimerRecord};
use crate::storage::SlotStore;

pub const DEFAULT_DURATION_SECS: u32 = 120;
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    /// Remaining reached zero. Only observable while the completion signal is
    /// being delivered; the timer settles in `Idle` before returning.
    Expired,
}

/// Handle for the single recurring recomputation.
///
/// Every start (or restore into `Running`) issues a ticker with a new id and
/// every pause, reset or expiry drops it. Ticks carrying any other id are
/// ignored, so two recomputations can never both take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    id: u64,
    period: Duration,
}

impl Ticker {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// Read-only view of the timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub duration_secs: u32,
    pub remaining_secs: u32,
    pub started_at_ms: Option<i64>,
    pub display: String,
    pub tier: UrgencyTier,
    pub at: DateTime<Utc>,
}

/// Seconds left of `duration_secs` at `now_ms` for a run anchored at
/// `started_at_ms`. Elapsed time is floored to whole seconds; an anchor in the
/// future counts as zero elapsed.
pub fn remaining_secs_at(duration_secs: u32, started_at_ms: i64, now_ms: i64) -> u32 {
    let elapsed_ms = now_ms.saturating_sub(started_at_ms).max(0);
    let elapsed_secs = u32::try_from(elapsed_ms / 1000).unwrap_or(u32::MAX);
    duration_secs.saturating_sub(elapsed_secs)
}

/// Parse a minutes value typed by the user. Blank, non-numeric and zero
/// inputs are rejected so the caller can keep its previous duration.
pub fn parse_duration_minutes(input: &str) -> Option<u32> {
    let s = input.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().filter(|m| *m > 0)
}

/// The rest timer for one page context.
pub struct RestTimer<S: SlotStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    notifier: Box<dyn Notifier>,
    notice: CompletionNotice,
    system_notifications: bool,
    tick_period: Duration,
    phase: TimerPhase,
    duration_secs: u32,
    remaining_secs: u32,
    /// Anchor timestamp (ms since epoch) of the current run.
    started_at_ms: Option<i64>,
    ticker: Option<Ticker>,
    next_ticker_id: u64,
}

impl<S: SlotStore, C: Clock> RestTimer<S, C> {
    /// Create an idle timer showing the default duration.
    ///
    /// Nothing is read from the store until [`restore`](Self::restore).
    pub fn new(store: S, clock: C, notifier: Box<dyn Notifier>) -> Self {
        Self {
            store,
            clock,
            notifier,
            notice: CompletionNotice::default(),
            system_notifications: true,
            tick_period: DEFAULT_TICK_PERIOD,
            phase: TimerPhase::Idle,
            duration_secs: DEFAULT_DURATION_SECS,
            remaining_secs: DEFAULT_DURATION_SECS,
            started_at_ms: None,
            ticker: None,
            next_ticker_id: 0,
        }
    }

    /// Duration shown when the store has no saved preference.
    pub fn with_default_duration(mut self, secs: u32) -> Self {
        if secs > 0 && self.phase == TimerPhase::Idle {
            self.duration_secs = secs;
            self.remaining_secs = secs;
        }
        self
    }

    pub fn with_notice(mut self, notice: CompletionNotice) -> Self {
        self.notice = notice;
        self
    }

    /// Whether the user granted system notification permission.
    pub fn with_system_notifications(mut self, allowed: bool) -> Self {
        self.system_notifications = allowed;
        self
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        if !period.is_zero() {
            self.tick_period = period;
        }
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn started_at_ms(&self) -> Option<i64> {
        self.started_at_ms
    }

    /// The active recurring recomputation, if any.
    pub fn ticker(&self) -> Option<Ticker> {
        self.ticker
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn tier(&self) -> UrgencyTier {
        UrgencyTier::for_remaining(self.remaining_secs)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            duration_secs: self.duration_secs,
            remaining_secs: self.remaining_secs,
            started_at_ms: self.started_at_ms,
            display: self.display(),
            tier: self.tier(),
            at: self.at(self.clock.now_ms()),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot(self.snapshot())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Tear down, handing back the store (a page unload).
    pub fn into_store(self) -> S {
        self.store
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Hydrate from the persisted slots and validate against the clock.
    ///
    /// Reads the saved duration preference, then the running-state record.
    /// A record whose countdown is still going resumes `Running` with a fresh
    /// ticker. One that ran out while nobody was watching is cleared and the
    /// timer shows zero; the completion signal is not fired again.
    pub fn restore(&mut self) -> Option<Event> {
        self.ticker = None;
        self.started_at_ms = None;
        self.phase = TimerPhase::Idle;

        match slots::load_duration(&self.store) {
            Ok(Some(secs)) => {
                self.duration_secs = secs;
                self.remaining_secs = secs;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "could not read saved duration"),
        }

        let record = match slots::load_timer_record(&mut self.store) {
            Ok(record) => record?,
            Err(e) => {
                warn!(error = %e, "could not read timer record");
                return None;
            }
        };

        if !record.running {
            self.clear_record();
            return None;
        }

        let now = self.clock.now_ms();
        let remaining = remaining_secs_at(record.duration, record.start_time, now);
        self.duration_secs = record.duration;
        self.remaining_secs = remaining;

        if remaining > 0 {
            self.phase = TimerPhase::Running;
            self.started_at_ms = Some(record.start_time);
            self.arm_ticker();
            self.persist();
            debug!(remaining, "resumed running rest timer");
        } else {
            self.clear_record();
            debug!("persisted rest timer already expired");
        }

        Some(Event::TimerRestored {
            running: remaining > 0,
            remaining_secs: remaining,
            started_at_ms: record.start_time,
            at: self.at(now),
        })
    }

    /// Start a full-length countdown. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.phase == TimerPhase::Running {
            return None;
        }
        let now = self.clock.now_ms();
        self.phase = TimerPhase::Running;
        self.started_at_ms = Some(now);
        self.remaining_secs = self.duration_secs;
        self.arm_ticker();
        self.persist();
        debug!(duration = self.duration_secs, "rest timer started");
        Some(Event::TimerStarted {
            duration_secs: self.duration_secs,
            started_at_ms: now,
            at: self.at(now),
        })
    }

    /// Stop counting and clear the running-state slot.
    ///
    /// Remaining time keeps the last recomputed value. Pausing an idle timer
    /// changes nothing and returns `None`.
    pub fn pause(&mut self) -> Option<Event> {
        let was_running = self.phase == TimerPhase::Running;
        self.halt();
        if !was_running {
            return None;
        }
        debug!(remaining = self.remaining_secs, "rest timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: self.at(self.clock.now_ms()),
        })
    }

    /// Pause, then show the full duration again. Does not start.
    pub fn reset(&mut self) -> Option<Event> {
        self.halt();
        self.remaining_secs = self.duration_secs;
        debug!("rest timer reset");
        Some(Event::TimerReset {
            duration_secs: self.duration_secs,
            at: self.at(self.clock.now_ms()),
        })
    }

    /// Change the countdown length. Only allowed while idle.
    ///
    /// The new length becomes the saved default for future sessions.
    pub fn set_duration(&mut self, minutes: u32) -> Option<Event> {
        if self.phase == TimerPhase::Running {
            debug!("duration change ignored while running");
            return None;
        }
        let secs = minutes.checked_mul(60).filter(|s| *s > 0)?;
        self.duration_secs = secs;
        self.remaining_secs = secs;
        if let Err(e) = slots::save_duration(&mut self.store, secs) {
            warn!(error = %e, "could not save duration preference");
        }
        Some(Event::DurationChanged {
            duration_secs: secs,
            at: self.at(self.clock.now_ms()),
        })
    }

    /// Recompute for the given ticker. Ticks from a cancelled ticker are
    /// ignored. Returns `Some(Event::TimerExpired)` when the countdown ends.
    pub fn tick(&mut self, ticker_id: u64) -> Option<Event> {
        match self.ticker {
            Some(t) if t.id == ticker_id => self.recompute(),
            _ => None,
        }
    }

    /// The page was shown or hidden. Regaining visibility while running
    /// recomputes immediately instead of waiting for the next tick.
    pub fn visibility_changed(&mut self, visible: bool) -> Option<Event> {
        if !visible || self.phase != TimerPhase::Running {
            return None;
        }
        self.recompute()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn recompute(&mut self) -> Option<Event> {
        let started = self.started_at_ms?;
        let now = self.clock.now_ms();
        self.remaining_secs = remaining_secs_at(self.duration_secs, started, now);
        if self.remaining_secs == 0 {
            return Some(self.expire(now));
        }
        self.persist();
        None
    }

    fn expire(&mut self, now: i64) -> Event {
        self.halt();
        self.remaining_secs = 0;
        self.phase = TimerPhase::Expired;
        info!(duration = self.duration_secs, "rest timer expired");
        notify::deliver(
            self.notifier.as_mut(),
            &self.notice,
            self.system_notifications,
        );
        self.phase = TimerPhase::Idle;
        Event::TimerExpired {
            duration_secs: self.duration_secs,
            at: self.at(now),
        }
    }

    /// Cancel the ticker, drop the anchor and clear the slot.
    fn halt(&mut self) {
        self.ticker = None;
        self.started_at_ms = None;
        self.phase = TimerPhase::Idle;
        self.clear_record();
    }

    fn arm_ticker(&mut self) {
        self.next_ticker_id += 1;
        self.ticker = Some(Ticker {
            id: self.next_ticker_id,
            period: self.tick_period,
        });
    }

    fn persist(&mut self) {
        let Some(started) = self.started_at_ms else {
            return;
        };
        let record = TimerRecord::running(started, self.duration_secs);
        if let Err(e) = slots::save_timer_record(&mut self.store, &record) {
            warn!(error = %e, "could not persist timer state");
        }
    }

    fn clear_record(&mut self) {
        if let Err(e) = slots::clear_timer_record(&mut self.store) {
            warn!(error = %e, "could not clear timer state");
        }
    }

    fn at(&self, now_ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(now_ms).unwrap_or_else(Utc::now)
    }
}
