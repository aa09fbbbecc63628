//! Exercise page glue around the rest timer: autosaving set rows and notes,
//! adding sets, and swipe/keyboard navigation.

pub mod api;
pub mod autosave;
pub mod navigation;
mod page;

pub use api::{AddSetRequest, AddedSet, NotesUpdate, SetUpdate, WorkoutApi, WorkoutBackend};
pub use autosave::{Debouncer, NotesDraft, SetRow};
pub use navigation::{Focus, NavTarget, PageAction};
pub use page::{ExercisePage, PageLayout, PageResponse, SaveOutcome};
