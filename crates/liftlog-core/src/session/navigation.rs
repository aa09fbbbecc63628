//! Swipe and keyboard mapping for the exercise page.

use serde::{Deserialize, Serialize};

pub const MIN_SWIPE_DISTANCE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavTarget {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    ToggleTimer,
    ResetTimer,
    Navigate(NavTarget),
}

/// Where keyboard focus sits when a key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    TextArea,
    Page,
}

impl Focus {
    fn is_typing(self) -> bool {
        matches!(self, Focus::Input | Focus::TextArea)
    }
}

/// Map a `KeyboardEvent.code` to an action. Keys pressed while typing are
/// left alone.
pub fn key_action(code: &str, focus: Focus) -> Option<PageAction> {
    if focus.is_typing() {
        return None;
    }
    match code {
        "Space" => Some(PageAction::ToggleTimer),
        "KeyR" => Some(PageAction::ResetTimer),
        "ArrowLeft" => Some(PageAction::Navigate(NavTarget::Previous)),
        "ArrowRight" => Some(PageAction::Navigate(NavTarget::Next)),
        _ => None,
    }
}

/// Tracks one horizontal touch gesture.
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    min_distance: f64,
    start_x: Option<f64>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(MIN_SWIPE_DISTANCE)
    }
}

impl SwipeTracker {
    pub fn new(min_distance: f64) -> Self {
        Self {
            min_distance,
            start_x: None,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    /// Finish the gesture. A rightward swipe goes back, leftward goes forward,
    /// provided that neighbour exists.
    pub fn touch_end(&mut self, x: f64, has_previous: bool, has_next: bool) -> Option<NavTarget> {
        let start = self.start_x.take()?;
        let distance = x - start;
        if distance > self.min_distance && has_previous {
            Some(NavTarget::Previous)
        } else if distance < -self.min_distance && has_next {
            Some(NavTarget::Next)
        } else {
            None
        }
    }
}

/// Path of the exercise at `order` within a workout session.
pub fn exercise_path(session_id: i64, order: i64) -> String {
    format!("/session/{session_id}/exercise/{order}/")
}
