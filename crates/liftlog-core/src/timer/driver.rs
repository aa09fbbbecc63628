//! Async tick driver.
//!
//! Feeds the timer's active ticker from a tokio interval until the ticker is
//! cancelled or replaced, or the countdown expires.

use tokio::time::{interval, MissedTickBehavior};

use super::engine::{RestTimer, TimerSnapshot};
use crate::clock::Clock;
use crate::events::Event;
use crate::storage::SlotStore;

/// Drive the current ticker to completion.
///
/// `on_tick` sees a snapshot after every recomputation. Returns the expiry
/// event, or `None` if the timer was not running or its ticker went away.
pub async fn drive<S, C, F>(timer: &mut RestTimer<S, C>, mut on_tick: F) -> Option<Event>
where
    S: SlotStore,
    C: Clock,
    F: FnMut(&TimerSnapshot),
{
    let ticker = timer.ticker()?;
    let mut ticks = interval(ticker.period());
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    ticks.tick().await;

    loop {
        ticks.tick().await;
        if timer.ticker() != Some(ticker) {
            return None;
        }
        let event = timer.tick(ticker.id());
        on_tick(&timer.snapshot());
        if event.is_some() {
            return event;
        }
    }
}
