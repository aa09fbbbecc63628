//! Typed access to the page's persisted slots.
//!
//! Slot names and the running-state JSON shape match what the workout page
//! already writes to browser local storage, so records written by either side
//! can be read by the other.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::SlotStore;
use crate::error::StorageError;

/// Running-state slot. Present only while a countdown is running.
pub const TIMER_STATE_KEY: &str = "timerState";
/// Configured countdown length in seconds.
pub const TIMER_DURATION_KEY: &str = "timerDuration";
/// Large-mode display preference.
pub const LARGE_MODE_KEY: &str = "largeMode";

/// The persisted record of a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub running: bool,
    /// Anchor timestamp, epoch milliseconds.
    pub start_time: i64,
    /// Countdown length in seconds.
    pub duration: u32,
}

impl TimerRecord {
    pub fn running(start_time: i64, duration: u32) -> Self {
        Self {
            running: true,
            start_time,
            duration,
        }
    }
}

/// Read the running-state record.
///
/// A record that does not parse, or carries a zero duration, is removed from
/// the store and reported as absent.
pub fn load_timer_record<S: SlotStore + ?Sized>(
    store: &mut S,
) -> Result<Option<TimerRecord>, StorageError> {
    let Some(raw) = store.get(TIMER_STATE_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<TimerRecord>(&raw) {
        Ok(record) if record.duration > 0 => Ok(Some(record)),
        Ok(_) => {
            warn!("discarding timer record with zero duration");
            store.remove(TIMER_STATE_KEY)?;
            Ok(None)
        }
        Err(e) => {
            warn!(error = %e, "discarding malformed timer record");
            store.remove(TIMER_STATE_KEY)?;
            Ok(None)
        }
    }
}

pub fn save_timer_record<S: SlotStore + ?Sized>(
    store: &mut S,
    record: &TimerRecord,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(record)
        .map_err(|e| StorageError::QueryFailed(format!("encode timer record: {e}")))?;
    store.set(TIMER_STATE_KEY, &json)
}

pub fn clear_timer_record<S: SlotStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    store.remove(TIMER_STATE_KEY)
}

/// Read the configured duration in seconds. Unparseable or zero values read as
/// absent so the caller keeps its own default.
pub fn load_duration<S: SlotStore + ?Sized>(store: &S) -> Result<Option<u32>, StorageError> {
    let value = store.get(TIMER_DURATION_KEY)?;
    Ok(value
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|secs| *secs > 0))
}

pub fn save_duration<S: SlotStore + ?Sized>(
    store: &mut S,
    duration_secs: u32,
) -> Result<(), StorageError> {
    store.set(TIMER_DURATION_KEY, &duration_secs.to_string())
}

pub fn load_large_mode<S: SlotStore + ?Sized>(store: &S) -> Result<bool, StorageError> {
    Ok(store.get(LARGE_MODE_KEY)?.as_deref() == Some("true"))
}

pub fn save_large_mode<S: SlotStore + ?Sized>(
    store: &mut S,
    enabled: bool,
) -> Result<(), StorageError> {
    store.set(LARGE_MODE_KEY, if enabled { "true" } else { "false" })
}
