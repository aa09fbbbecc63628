//! One exercise page: rest timer, set rows, notes and navigation wired
//! together.
//!
//! Saves never block the page. A failed request is logged and reported as
//! [`SaveOutcome::Failed`]; the edit stays on the page for the next attempt.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::api::{AddSetRequest, AddedSet, NotesUpdate, WorkoutBackend};
use super::autosave::{Debouncer, NotesDraft, SetRow, DEFAULT_DEBOUNCE_MS};
use super::navigation::{exercise_path, key_action, Focus, NavTarget, PageAction, SwipeTracker};
use crate::clock::Clock;
use crate::events::Event;
use crate::storage::{slots, SlotStore};
use crate::timer::{parse_duration_minutes, RestTimer};

pub const DEFAULT_INDICATOR_MS: i64 = 1000;

/// Identity and neighbours of the exercise being shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    pub session_id: i64,
    pub exercise_session_id: i64,
    pub current_order: i64,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Failed,
}

/// What a page interaction led to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    Timer(Event),
    NavigateTo(String),
    Nothing,
}

pub struct ExercisePage<B, S, C>
where
    B: WorkoutBackend,
    S: SlotStore,
    C: Clock,
{
    layout: PageLayout,
    backend: B,
    timer: RestTimer<S, C>,
    sets: Vec<SetRow>,
    notes: NotesDraft,
    set_saves: Debouncer<i64>,
    notes_save: Debouncer<()>,
    swipe: SwipeTracker,
    indicator_ms: i64,
    last_saved_at_ms: Option<i64>,
}

impl<B, S, C> ExercisePage<B, S, C>
where
    B: WorkoutBackend,
    S: SlotStore,
    C: Clock,
{
    /// Build the page around an already restored timer.
    pub fn new(
        layout: PageLayout,
        backend: B,
        timer: RestTimer<S, C>,
        sets: Vec<SetRow>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            layout,
            backend,
            timer,
            sets,
            notes: NotesDraft::new(notes),
            set_saves: Debouncer::new(DEFAULT_DEBOUNCE_MS),
            notes_save: Debouncer::new(DEFAULT_DEBOUNCE_MS),
            swipe: SwipeTracker::default(),
            indicator_ms: DEFAULT_INDICATOR_MS,
            last_saved_at_ms: None,
        }
    }

    pub fn with_debounce_ms(mut self, ms: i64) -> Self {
        self.set_saves = Debouncer::new(ms);
        self.notes_save = Debouncer::new(ms);
        self
    }

    pub fn with_indicator_ms(mut self, ms: i64) -> Self {
        self.indicator_ms = ms;
        self
    }

    pub fn with_swipe_distance(mut self, min_distance: f64) -> Self {
        self.swipe = SwipeTracker::new(min_distance);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn timer(&self) -> &RestTimer<S, C> {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut RestTimer<S, C> {
        &mut self.timer
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn sets(&self) -> &[SetRow] {
        &self.sets
    }

    pub fn notes(&self) -> &NotesDraft {
        &self.notes
    }

    /// Earliest pending autosave deadline, for scheduling the next poll.
    pub fn next_save_deadline(&self) -> Option<i64> {
        match (self.set_saves.next_deadline(), self.notes_save.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether the "saved" indicator is currently showing.
    pub fn save_indicator_visible(&self) -> bool {
        let now = self.now();
        self.last_saved_at_ms
            .is_some_and(|at| now - at < self.indicator_ms)
    }

    pub fn large_mode(&self) -> bool {
        slots::load_large_mode(self.timer.store()).unwrap_or(false)
    }

    // ── Timer controls ───────────────────────────────────────────────

    /// Space bar or start/pause button.
    pub fn toggle_timer(&mut self) -> Option<Event> {
        if self.timer.is_running() {
            self.timer.pause()
        } else {
            self.timer.start()
        }
    }

    /// The minutes field changed. Invalid input keeps the previous duration.
    pub fn duration_input(&mut self, input: &str) -> Option<Event> {
        let minutes = parse_duration_minutes(input)?;
        self.timer.set_duration(minutes)
    }

    pub fn toggle_large_mode(&mut self) -> bool {
        let enabled = !self.large_mode();
        if let Err(e) = slots::save_large_mode(self.timer.store_mut(), enabled) {
            warn!(error = %e, "could not save large mode preference");
        }
        enabled
    }

    // ── Set rows ─────────────────────────────────────────────────────

    pub fn edit_weight(&mut self, set_id: i64, input: &str) {
        let now = self.now();
        if let Some(row) = self.row_mut(set_id) {
            row.weight_input = input.to_string();
            self.set_saves.schedule(set_id, now);
        }
    }

    pub fn edit_reps(&mut self, set_id: i64, input: &str) {
        let now = self.now();
        if let Some(row) = self.row_mut(set_id) {
            row.reps_input = input.to_string();
            self.set_saves.schedule(set_id, now);
        }
    }

    /// Checkbox toggled: save right away. Checking a set while the timer is
    /// idle starts a fresh rest period.
    pub async fn set_completed(&mut self, set_id: i64, completed: bool) -> Option<Event> {
        let row = self.row_mut(set_id)?;
        row.completed = completed;
        self.set_saves.cancel(&set_id);
        self.save_set(set_id).await;

        if completed && !self.timer.is_running() {
            self.timer.reset();
            return self.timer.start();
        }
        None
    }

    pub async fn add_set(&mut self) -> Option<AddedSet> {
        let request = AddSetRequest {
            exercise_session_id: self.layout.exercise_session_id,
        };
        match self.backend.add_set(&request).await {
            Ok(added) => {
                debug!(set_id = added.set_id, set_number = added.set_number, "set added");
                self.sets.push(SetRow::new(added.set_id));
                Some(added)
            }
            Err(e) => {
                warn!(error = %e, "adding set failed");
                None
            }
        }
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub fn edit_notes(&mut self, text: &str) {
        self.notes.edit(text);
        let now = self.now();
        self.notes_save.schedule((), now);
    }

    /// The notes field lost focus. Dirty notes are saved at once.
    pub async fn blur_notes(&mut self) -> Option<SaveOutcome> {
        if !self.notes.is_dirty() {
            return None;
        }
        self.notes_save.cancel(&());
        Some(self.save_notes().await)
    }

    // ── Autosave ─────────────────────────────────────────────────────

    /// Send every save whose debounce has elapsed.
    pub async fn flush_due(&mut self) -> Vec<SaveOutcome> {
        let now = self.now();
        let mut outcomes = Vec::new();
        for set_id in self.set_saves.take_due(now) {
            outcomes.push(self.save_set(set_id).await);
        }
        if !self.notes_save.take_due(now).is_empty() && self.notes.is_dirty() {
            outcomes.push(self.save_notes().await);
        }
        outcomes
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Resolve a move to a neighbouring exercise. Dirty notes are saved
    /// first; if that save fails the page stays put.
    pub async fn navigate(&mut self, target: NavTarget) -> Option<String> {
        let order = match target {
            NavTarget::Previous if self.layout.has_previous => self.layout.current_order - 1,
            NavTarget::Next if self.layout.has_next => self.layout.current_order + 1,
            _ => return None,
        };
        if self.notes.is_dirty() {
            self.notes_save.cancel(&());
            if self.save_notes().await == SaveOutcome::Failed {
                return None;
            }
        }
        Some(exercise_path(self.layout.session_id, order))
    }

    pub async fn key_pressed(&mut self, code: &str, focus: Focus) -> PageResponse {
        match key_action(code, focus) {
            Some(PageAction::ToggleTimer) => self.toggle_timer().into(),
            Some(PageAction::ResetTimer) => self.timer.reset().into(),
            Some(PageAction::Navigate(target)) => self.navigate(target).await.into(),
            None => PageResponse::Nothing,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.swipe.touch_start(x);
    }

    pub async fn touch_end(&mut self, x: f64) -> Option<String> {
        let target = self
            .swipe
            .touch_end(x, self.layout.has_previous, self.layout.has_next)?;
        self.navigate(target).await
    }

    /// Page shown again after being hidden.
    pub fn visibility_changed(&mut self, visible: bool) -> Option<Event> {
        self.timer.visibility_changed(visible)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn now(&self) -> i64 {
        self.timer.clock().now_ms()
    }

    fn row_mut(&mut self, set_id: i64) -> Option<&mut SetRow> {
        self.sets.iter_mut().find(|row| row.set_id == set_id)
    }

    async fn save_set(&mut self, set_id: i64) -> SaveOutcome {
        let Some(update) = self
            .sets
            .iter()
            .find(|row| row.set_id == set_id)
            .map(SetRow::to_update)
        else {
            return SaveOutcome::Failed;
        };
        match self.backend.update_set(&update).await {
            Ok(()) => {
                self.last_saved_at_ms = Some(self.now());
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!(set_id, error = %e, "set autosave failed");
                SaveOutcome::Failed
            }
        }
    }

    async fn save_notes(&mut self) -> SaveOutcome {
        let update = NotesUpdate {
            exercise_session_id: self.layout.exercise_session_id,
            notes: self.notes.text.clone(),
        };
        match self.backend.update_notes(&update).await {
            Ok(()) => {
                self.notes.mark_saved();
                self.last_saved_at_ms = Some(self.now());
                SaveOutcome::Saved
            }
            Err(e) => {
                warn!(error = %e, "notes autosave failed");
                SaveOutcome::Failed
            }
        }
    }
}

impl From<Option<Event>> for PageResponse {
    fn from(event: Option<Event>) -> Self {
        event.map_or(PageResponse::Nothing, PageResponse::Timer)
    }
}

impl From<Option<String>> for PageResponse {
    fn from(path: Option<String>) -> Self {
        path.map_or(PageResponse::Nothing, PageResponse::NavigateTo)
    }
}
