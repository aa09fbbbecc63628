//! Best-effort completion signals.
//!
//! A finished rest period vibrates the device and, if the user granted
//! permission, raises a system notification. Either capability may be
//! missing; that is logged and otherwise ignored.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::NotifyError;

/// What to show and how to buzz when a rest period ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionNotice {
    pub title: String,
    pub body: String,
    /// Alternating on/off durations in milliseconds. Empty disables vibration.
    pub vibration_pattern: Vec<u32>,
}

impl Default for CompletionNotice {
    fn default() -> Self {
        Self {
            title: "Rest Timer Complete!".into(),
            body: "Your rest period is over".into(),
            vibration_pattern: vec![200, 100, 200],
        }
    }
}

pub trait Notifier {
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), NotifyError>;
    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError>;
}

/// Fire every signal the notice asks for, swallowing failures.
///
/// `system_allowed` mirrors the notification permission: without it only the
/// vibration is attempted.
pub fn deliver(notifier: &mut dyn Notifier, notice: &CompletionNotice, system_allowed: bool) {
    if !notice.vibration_pattern.is_empty() {
        if let Err(e) = notifier.vibrate(&notice.vibration_pattern) {
            warn!(error = %e, "vibration skipped");
        }
    }
    if system_allowed {
        if let Err(e) = notifier.notify(&notice.title, &notice.body) {
            warn!(error = %e, "completion notification skipped");
        }
    }
}

/// Does nothing. Every capability reports as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn vibrate(&mut self, _pattern: &[u32]) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported("vibration"))
    }

    fn notify(&mut self, _title: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported("notifications"))
    }
}

/// Terminal notifier: rings the bell and logs the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn vibrate(&mut self, _pattern: &[u32]) -> Result<(), NotifyError> {
        let mut out = std::io::stderr();
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|e| NotifyError::Failed(e.to_string()))
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        info!(title, body, "rest timer complete");
        Ok(())
    }
}

/// A signal captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Vibrate(Vec<u32>),
    Notify { title: String, body: String },
}

/// Records every signal it receives. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    signals: Rc<RefCell<Vec<Signal>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.signals.borrow().clone()
    }

    /// Number of system notifications received.
    pub fn notification_count(&self) -> usize {
        self.signals
            .borrow()
            .iter()
            .filter(|s| matches!(s, Signal::Notify { .. }))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), NotifyError> {
        self.signals
            .borrow_mut()
            .push(Signal::Vibrate(pattern.to_vec()));
        Ok(())
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.signals.borrow_mut().push(Signal::Notify {
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deliver_respects_permission() {
        let recorder = RecordingNotifier::new();
        let mut handle = recorder.clone();
        deliver(&mut handle, &CompletionNotice::default(), false);
        assert_eq!(recorder.signals(), vec![Signal::Vibrate(vec![200, 100, 200])]);

        deliver(&mut handle, &CompletionNotice::default(), true);
        assert_eq!(recorder.notification_count(), 1);
    }

    #[test]
    fn deliver_survives_missing_capabilities() {
        let mut notifier = NullNotifier;
        deliver(&mut notifier, &CompletionNotice::default(), true);
    }

    #[test]
    fn empty_pattern_skips_vibration() {
        let recorder = RecordingNotifier::new();
        let mut handle = recorder.clone();
        let notice = CompletionNotice {
            vibration_pattern: Vec::new(),
            ..CompletionNotice::default()
        };
        deliver(&mut handle, &notice, true);
        assert_eq!(
            recorder.signals(),
            vec![Signal::Notify {
                title: "Rest Timer Complete!".into(),
                body: "Your rest period is over".into(),
            }]
        );
    }
}
