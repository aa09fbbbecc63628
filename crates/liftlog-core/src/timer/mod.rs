mod display;
mod driver;
mod engine;

pub use display::{format_clock, UrgencyTier, WARNING_THRESHOLD_SECS};
pub use driver::drive;
pub use engine::{
    parse_duration_minutes, remaining_secs_at, RestTimer, Ticker, TimerPhase, TimerSnapshot,
    DEFAULT_DURATION_SECS, DEFAULT_TICK_PERIOD,
};
