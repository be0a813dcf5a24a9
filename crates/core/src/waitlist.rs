//! Waitlist signup validation.
//!
//! A [`WaitlistDraft`] holds the raw form fields exactly as submitted; a
//! [`WaitlistEntry`] only exists after validation has passed. Checks run in
//! order and stop at the first failure: required fields first, then the
//! email shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Email, EntryStatus};

/// Errors produced by draft validation.
///
/// The messages are user-facing; they are rendered verbatim in the form's
/// inline message region.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields are empty after trimming.
    #[error("Please fill in all required fields")]
    MissingField,
    /// The email does not have the accepted `x@y.z` shape.
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Raw signup form fields, untrimmed and unvalidated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub monthly_revenue: String,
}

/// A validated waitlist signup, ready for the remote data gateway.
///
/// Immutable from the client's perspective once inserted; the gateway owns
/// the record after that.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub first_name: String,
    pub last_name: String,
    /// Lower-cased at validation time so the gateway's uniqueness check is
    /// case-insensitive.
    pub email: Email,
    pub monthly_revenue: String,
    pub created_at: DateTime<Utc>,
    pub status: EntryStatus,
}

impl WaitlistDraft {
    /// Validate the draft into a [`WaitlistEntry`].
    ///
    /// Fields are trimmed, the email is lower-cased, and `created_at` is
    /// stamped with the supplied time. New entries always start as
    /// [`EntryStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] if any field is empty after
    /// trimming, or [`ValidationError::InvalidEmail`] if the email shape is
    /// rejected. Checks short-circuit, so a draft with both problems reports
    /// the missing field.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<WaitlistEntry, ValidationError> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim().to_lowercase();
        let monthly_revenue = self.monthly_revenue.trim();

        if first_name.is_empty()
            || last_name.is_empty()
            || email.is_empty()
            || monthly_revenue.is_empty()
        {
            return Err(ValidationError::MissingField);
        }

        let email = Email::parse(&email).map_err(|_| ValidationError::InvalidEmail)?;

        Ok(WaitlistEntry {
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email,
            monthly_revenue: monthly_revenue.to_owned(),
            created_at: now,
            status: EntryStatus::Pending,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> WaitlistDraft {
        WaitlistDraft {
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            email: "JANE@X.COM".to_owned(),
            monthly_revenue: "10k".to_owned(),
        }
    }

    #[test]
    fn test_valid_draft_normalizes_email() {
        let entry = draft().validate(Utc::now()).unwrap();
        assert_eq!(entry.email.as_str(), "jane@x.com");
        assert_eq!(entry.first_name, "Jane");
        assert_eq!(entry.status, EntryStatus::Pending);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let entry = WaitlistDraft {
            first_name: "  Jane ".to_owned(),
            last_name: " Doe".to_owned(),
            email: " jane@x.com ".to_owned(),
            monthly_revenue: " 10k ".to_owned(),
        }
        .validate(Utc::now())
        .unwrap();
        assert_eq!(entry.first_name, "Jane");
        assert_eq!(entry.last_name, "Doe");
        assert_eq!(entry.email.as_str(), "jane@x.com");
        assert_eq!(entry.monthly_revenue, "10k");
    }

    #[test]
    fn test_each_missing_field_rejected() {
        for field in ["first_name", "last_name", "email", "monthly_revenue"] {
            let mut d = draft();
            match field {
                "first_name" => d.first_name = "   ".to_owned(),
                "last_name" => d.last_name = String::new(),
                "email" => d.email = " ".to_owned(),
                _ => d.monthly_revenue = String::new(),
            }
            assert_eq!(
                d.validate(Utc::now()),
                Err(ValidationError::MissingField),
                "field {field} should be required"
            );
        }
    }

    #[test]
    fn test_invalid_email_shapes() {
        for bad in ["a@b", "abc", "a@.com", "a@b@c.co", "a b@c.co"] {
            let mut d = draft();
            d.email = bad.to_owned();
            assert_eq!(
                d.validate(Utc::now()),
                Err(ValidationError::InvalidEmail),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_minimal_valid_email() {
        let mut d = draft();
        d.email = "a@b.co".to_owned();
        assert!(d.validate(Utc::now()).is_ok());
    }

    #[test]
    fn test_missing_field_reported_before_bad_email() {
        let mut d = draft();
        d.first_name = String::new();
        d.email = "not-an-email".to_owned();
        assert_eq!(d.validate(Utc::now()), Err(ValidationError::MissingField));
    }

    #[test]
    fn test_created_at_uses_supplied_time() {
        let now = Utc::now();
        let entry = draft().validate(now).unwrap();
        assert_eq!(entry.created_at, now);
    }
}
