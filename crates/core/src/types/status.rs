//! Status enums.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a waitlist entry.
///
/// New signups are created as `Pending`; the remaining states are applied
/// by the operations team from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    #[default]
    Pending,
    Invited,
    Converted,
    Declined,
}

impl EntryStatus {
    /// Display label used in the dashboard status badge.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Invited => "invited",
            Self::Converted => "converted",
            Self::Declined => "declined",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(EntryStatus::default(), EntryStatus::Pending);
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&EntryStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");

        let status: EntryStatus = serde_json::from_str("\"invited\"").unwrap();
        assert_eq!(status, EntryStatus::Invited);
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(EntryStatus::Converted.to_string(), "converted");
    }
}
