//! Debounced autosave bookkeeping.
//!
//! Pure deadline tracking driven by the caller's clock; the page decides when
//! to poll and what to send.

use std::collections::BTreeMap;

use super::api::SetUpdate;

pub const DEFAULT_DEBOUNCE_MS: i64 = 500;

/// Per-key trailing debounce. Rescheduling a key replaces its deadline.
#[derive(Debug, Clone)]
pub struct Debouncer<K: Ord + Clone> {
    delay_ms: i64,
    pending: BTreeMap<K, i64>,
}

impl<K: Ord + Clone> Debouncer<K> {
    pub fn new(delay_ms: i64) -> Self {
        Self {
            delay_ms: delay_ms.max(0),
            pending: BTreeMap::new(),
        }
    }

    pub fn schedule(&mut self, key: K, now_ms: i64) {
        self.pending.insert(key, now_ms + self.delay_ms);
    }

    /// Drop a pending deadline. Returns whether one existed.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending.remove(key).is_some()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn next_deadline(&self) -> Option<i64> {
        self.pending.values().copied().min()
    }

    /// Remove and return every key whose deadline has passed.
    pub fn take_due(&mut self, now_ms: i64) -> Vec<K> {
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now_ms)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &due {
            self.pending.remove(key);
        }
        due
    }
}

/// One set row as typed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SetRow {
    pub set_id: i64,
    pub weight_input: String,
    pub reps_input: String,
    pub completed: bool,
}

impl SetRow {
    pub fn new(set_id: i64) -> Self {
        Self {
            set_id,
            weight_input: "0".into(),
            reps_input: "0".into(),
            completed: false,
        }
    }

    /// The request body for this row. Unparseable inputs save as zero.
    pub fn to_update(&self) -> SetUpdate {
        SetUpdate {
            set_id: self.set_id,
            weight: parse_weight(&self.weight_input),
            reps: parse_reps(&self.reps_input),
            completed: self.completed,
        }
    }
}

/// Leading decimal number of `input`, or 0.
pub fn parse_weight(input: &str) -> f64 {
    let s = input.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return 0.0;
    }
    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite())
        .unwrap_or(0.0)
}

/// Leading integer of `input`, or 0. Negative counts save as 0.
pub fn parse_reps(input: &str) -> u32 {
    let s = input.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().unwrap_or(0)
}

/// Notes textarea state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesDraft {
    pub text: String,
    dirty: bool,
}

impl NotesDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dirty: false,
        }
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reschedule_replaces_deadline() {
        let mut d = Debouncer::new(500);
        d.schedule(1, 0);
        d.schedule(1, 300);
        assert!(d.take_due(500).is_empty());
        assert_eq!(d.take_due(800), vec![1]);
        assert!(!d.is_pending(&1));
    }

    #[test]
    fn keys_debounce_independently() {
        let mut d = Debouncer::new(500);
        d.schedule(1, 0);
        d.schedule(2, 200);
        assert_eq!(d.next_deadline(), Some(500));
        assert_eq!(d.take_due(600), vec![1]);
        assert!(d.cancel(&2));
        assert!(!d.cancel(&2));
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn weight_parses_like_a_form_field() {
        assert_eq!(parse_weight("62.5"), 62.5);
        assert_eq!(parse_weight(" 40kg"), 40.0);
        assert_eq!(parse_weight("-2.5"), -2.5);
        assert_eq!(parse_weight(".5"), 0.5);
        assert_eq!(parse_weight("1.2.3"), 1.2);
        assert_eq!(parse_weight(""), 0.0);
        assert_eq!(parse_weight("abc"), 0.0);
        assert_eq!(parse_weight("-"), 0.0);
    }

    #[test]
    fn reps_parse_like_a_form_field() {
        assert_eq!(parse_reps("8"), 8);
        assert_eq!(parse_reps("8x"), 8);
        assert_eq!(parse_reps("+5"), 5);
        assert_eq!(parse_reps("-3"), 0);
        assert_eq!(parse_reps(""), 0);
    }

    #[test]
    fn row_builds_update() {
        let row = SetRow {
            set_id: 4,
            weight_input: "100".into(),
            reps_input: "five".into(),
            completed: true,
        };
        let update = row.to_update();
        assert_eq!(update.weight, 100.0);
        assert_eq!(update.reps, 0);
        assert!(update.completed);
    }

    #[test]
    fn notes_dirty_tracking() {
        let mut notes = NotesDraft::new("old");
        assert!(!notes.is_dirty());
        notes.edit("new");
        assert!(notes.is_dirty());
        notes.mark_saved();
        assert!(!notes.is_dirty());
        assert_eq!(notes.text, "new");
    }
}
