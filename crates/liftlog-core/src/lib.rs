//! # liftlog Core Library
//!
//! The interaction layer of a workout-logging page, minus the page itself.
//!
//! ## Architecture
//!
//! - **Rest Timer**: A wall-clock-anchored countdown that requires the caller
//!   to periodically invoke `tick()`; survives reloads through a persisted slot
//! - **Storage**: Key-value slots (in memory or SQLite) and TOML configuration
//! - **Session**: Debounced autosave of sets and notes against the workout
//!   backend, adding sets, swipe and keyboard navigation
//!
//! ## Key Components
//!
//! - [`RestTimer`]: Core timer state machine
//! - [`SlotStore`]: Persisted slot backend
//! - [`ExercisePage`]: Page-level wiring
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod notify;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ApiError, ConfigError, CoreError, NotifyError, StorageError};
pub use events::Event;
pub use notify::{CompletionNotice, LogNotifier, Notifier, NullNotifier, RecordingNotifier};
pub use session::{ExercisePage, PageLayout, WorkoutApi, WorkoutBackend};
pub use storage::{Config, Database, MemoryStore, SlotStore};
pub use timer::{RestTimer, TimerPhase, TimerSnapshot, UrgencyTier};
