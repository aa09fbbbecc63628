//! Shared setup for commands: every invocation is one page load.

use std::time::Duration;

use liftlog_core::session::WorkoutApi;
use liftlog_core::storage::Database;
use liftlog_core::timer::RestTimer;
use liftlog_core::{Config, Event, SystemClock};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::notifier::DesktopNotifier;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the slot database and hydrate the rest timer from it.
///
/// A countdown that ran out while nothing was watching is reported, silently.
pub fn open_timer(config: &Config) -> Result<RestTimer<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut timer = RestTimer::new(db, SystemClock, Box::new(DesktopNotifier::default()))
        .with_default_duration(config.timer.default_duration_secs)
        .with_notice(config.completion_notice())
        .with_system_notifications(config.notifications.enabled)
        .with_tick_period(Duration::from_millis(config.timer.tick_period_ms));

    if let Some(event @ Event::TimerRestored { running: false, .. }) = timer.restore() {
        print_event(&event)?;
    }
    debug!(phase = ?timer.phase(), remaining = timer.remaining_secs(), "timer loaded");
    Ok(timer)
}

pub fn api(config: &Config) -> Result<WorkoutApi, Box<dyn std::error::Error>> {
    Ok(WorkoutApi::new(
        &config.server.base_url,
        config.server.csrf_token.clone(),
    )?)
}

pub fn runtime() -> std::io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

pub fn print_event(event: &Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

pub fn print_snapshot(timer: &RestTimer<Database>) -> Result<(), serde_json::Error> {
    print_event(&timer.snapshot_event())
}
