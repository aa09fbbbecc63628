//! Countdown rendering.

use serde::{Deserialize, Serialize};

/// Remaining seconds at or below which the display turns to warning.
pub const WARNING_THRESHOLD_SECS: u32 = 10;

/// Presentational urgency of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Normal,
    Warning,
    Danger,
}

impl UrgencyTier {
    pub fn for_remaining(remaining_secs: u32) -> Self {
        match remaining_secs {
            0 => UrgencyTier::Danger,
            s if s <= WARNING_THRESHOLD_SECS => UrgencyTier::Warning,
            _ => UrgencyTier::Normal,
        }
    }

    /// Display color the page paints the countdown with.
    pub fn color(self) -> &'static str {
        match self {
            UrgencyTier::Normal => "#4CAF50",
            UrgencyTier::Warning => "#ff9800",
            UrgencyTier::Danger => "#f44336",
        }
    }
}

/// `MM:SS`, zero padded. Minutes are not capped at 99.
pub fn format_clock(remaining_secs: u32) -> String {
    format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(5), "00:05");
        assert_eq!(format_clock(120), "02:00");
        assert_eq!(format_clock(605), "10:05");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(UrgencyTier::for_remaining(0), UrgencyTier::Danger);
        assert_eq!(UrgencyTier::for_remaining(1), UrgencyTier::Warning);
        assert_eq!(UrgencyTier::for_remaining(10), UrgencyTier::Warning);
        assert_eq!(UrgencyTier::for_remaining(11), UrgencyTier::Normal);
        assert_eq!(UrgencyTier::Warning.color(), "#ff9800");
    }
}
