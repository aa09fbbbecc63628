//! Desktop completion signals for the terminal.

use liftlog_core::error::NotifyError;
use liftlog_core::notify::{LogNotifier, Notifier};
use notify_rust::Notification;
use tracing::info;

type ShowFn = fn(&str, &str) -> Result<(), String>;

/// Rings the terminal bell and raises a desktop notification.
///
/// When no notification daemon answers, the message is logged instead and
/// the failure is handed back to the caller.
pub struct DesktopNotifier {
    bell: LogNotifier,
    show: ShowFn,
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self {
            bell: LogNotifier,
            show: show_desktop,
        }
    }
}

fn show_desktop(title: &str, body: &str) -> Result<(), String> {
    Notification::new()
        .summary(title)
        .body(body)
        .appname("liftlog")
        .icon("alarm-clock")
        .show()
        .map(|_| ())
        .map_err(|e| e.to_string())
}

impl Notifier for DesktopNotifier {
    fn vibrate(&mut self, pattern: &[u32]) -> Result<(), NotifyError> {
        self.bell.vibrate(pattern)
    }

    fn notify(&mut self, title: &str, body: &str) -> Result<(), NotifyError> {
        (self.show)(title, body).map_err(|message| {
            info!(title, body, "rest timer complete");
            NotifyError::Failed(message)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_core::notify::{deliver, CompletionNotice};

    fn shown(_title: &str, _body: &str) -> Result<(), String> {
        Ok(())
    }

    fn no_daemon(_title: &str, _body: &str) -> Result<(), String> {
        Err("org.freedesktop.Notifications not available".into())
    }

    #[test]
    fn shown_notification_succeeds() {
        let mut notifier = DesktopNotifier {
            bell: LogNotifier,
            show: shown,
        };
        assert!(notifier.notify("Rest Timer Complete!", "Your rest period is over").is_ok());
    }

    #[test]
    fn missing_daemon_is_reported_as_failed() {
        let mut notifier = DesktopNotifier {
            bell: LogNotifier,
            show: no_daemon,
        };
        match notifier.notify("Rest Timer Complete!", "Your rest period is over") {
            Err(NotifyError::Failed(message)) => assert!(message.contains("not available")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn delivery_survives_missing_daemon() {
        let mut notifier = DesktopNotifier {
            bell: LogNotifier,
            show: no_daemon,
        };
        deliver(&mut notifier, &CompletionNotice::default(), true);
    }
}
