//! Admin session gate.
//!
//! Gates visibility of the admin dashboard behind a single configured
//! access key. This is a visibility gate, not a security boundary: the key
//! is a short shared code and the session record is a boolean plus an
//! expiry timestamp.
//!
//! The record lives in the server session under two string keys,
//! `admin_authenticated` (`"true"`) and `admin_expires` (epoch millis as a
//! string). A record is valid iff both keys are present, parseable, and
//! `now < expires`; any violation clears both keys on read.

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tower_sessions::Session;

/// Session keys for the admin gate record.
pub mod keys {
    /// Boolean flag, stored as the string `"true"`.
    pub const ADMIN_AUTHENTICATED: &str = "admin_authenticated";
    /// Expiry timestamp, stored as epoch millis in a string.
    pub const ADMIN_EXPIRES: &str = "admin_expires";
}

/// How long an unlocked session stays valid.
pub const SESSION_TTL_MS: i64 = 8 * 60 * 60 * 1000;

/// Errors from the session gate.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The supplied access key does not match the configured one.
    #[error("Invalid access key")]
    InvalidKey,
    /// The underlying session store failed.
    #[error("session store error: {0}")]
    Store(#[from] tower_sessions::session::Error),
}

/// Parsed admin session record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSession {
    pub authenticated: bool,
    pub expires_at_ms: i64,
}

impl AdminSession {
    /// Start a fresh session expiring [`SESSION_TTL_MS`] from `now_ms`.
    #[must_use]
    pub const fn begin(now_ms: i64) -> Self {
        Self {
            authenticated: true,
            expires_at_ms: now_ms + SESSION_TTL_MS,
        }
    }

    /// Parse the two stored string values into a record.
    ///
    /// Returns `None` when either key is absent, the flag is not exactly
    /// `"true"`, or the expiry does not parse.
    #[must_use]
    pub fn from_values(flag: Option<&str>, expires: Option<&str>) -> Option<Self> {
        let flag = flag?;
        if flag != "true" {
            return None;
        }
        let expires_at_ms = expires?.parse::<i64>().ok()?;
        Some(Self {
            authenticated: true,
            expires_at_ms,
        })
    }

    /// Whether the record is still valid at `now_ms`.
    #[must_use]
    pub const fn is_valid(&self, now_ms: i64) -> bool {
        self.authenticated && now_ms < self.expires_at_ms
    }
}

/// Current time as epoch millis.
#[must_use]
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Compare the supplied key against the configured secret and, on match,
/// unlock the session for the next eight hours.
///
/// On mismatch the session is left untouched, so a previously unlocked
/// session survives a failed re-authentication attempt.
///
/// # Errors
///
/// Returns [`SessionError::InvalidKey`] on mismatch, or a store error if
/// the session cannot be written.
pub async fn authenticate(
    session: &Session,
    supplied: &str,
    access_key: &SecretString,
    now_ms: i64,
) -> Result<(), SessionError> {
    if supplied != access_key.expose_secret() {
        return Err(SessionError::InvalidKey);
    }

    let record = AdminSession::begin(now_ms);
    session
        .insert(keys::ADMIN_AUTHENTICATED, "true".to_string())
        .await?;
    session
        .insert(keys::ADMIN_EXPIRES, record.expires_at_ms.to_string())
        .await?;
    Ok(())
}

/// Check whether the session is unlocked.
///
/// An expired or malformed record is cleared as a side effect of the read
/// (implicit logout), and `false` is returned.
///
/// # Errors
///
/// Returns a store error if the session cannot be read or cleared.
pub async fn is_authenticated(session: &Session, now_ms: i64) -> Result<bool, SessionError> {
    let flag: Option<String> = session.get(keys::ADMIN_AUTHENTICATED).await?;
    let expires: Option<String> = session.get(keys::ADMIN_EXPIRES).await?;

    match AdminSession::from_values(flag.as_deref(), expires.as_deref()) {
        Some(record) if record.is_valid(now_ms) => Ok(true),
        _ => {
            logout(session).await?;
            Ok(false)
        }
    }
}

/// Unconditionally clear the admin record from the session.
///
/// # Errors
///
/// Returns a store error if the session cannot be modified.
pub async fn logout(session: &Session) -> Result<(), SessionError> {
    session
        .remove::<String>(keys::ADMIN_AUTHENTICATED)
        .await?;
    session.remove::<String>(keys::ADMIN_EXPIRES).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    fn test_key() -> SecretString {
        SecretString::from("ALPHA-88")
    }

    #[test]
    fn test_begin_expires_in_eight_hours() {
        let record = AdminSession::begin(NOW);
        assert!(record.authenticated);
        assert_eq!(record.expires_at_ms, NOW + 8 * 60 * 60 * 1000);
    }

    #[test]
    fn test_from_values_happy_path() {
        let record = AdminSession::from_values(Some("true"), Some("12345")).unwrap();
        assert_eq!(record.expires_at_ms, 12345);
    }

    #[test]
    fn test_from_values_malformed() {
        assert!(AdminSession::from_values(None, Some("12345")).is_none());
        assert!(AdminSession::from_values(Some("true"), None).is_none());
        assert!(AdminSession::from_values(Some("yes"), Some("12345")).is_none());
        assert!(AdminSession::from_values(Some("true"), Some("not-a-number")).is_none());
    }

    #[test]
    fn test_is_valid_boundary() {
        let record = AdminSession {
            authenticated: true,
            expires_at_ms: NOW,
        };
        // expires_at <= now is expired, strictly-before is required
        assert!(!record.is_valid(NOW));
        assert!(!record.is_valid(NOW + 1));
        assert!(record.is_valid(NOW - 1));
    }

    #[tokio::test]
    async fn test_authenticate_then_check() {
        let session = test_session();
        authenticate(&session, "ALPHA-88", &test_key(), NOW)
            .await
            .unwrap();
        assert!(is_authenticated(&session, NOW + 1000).await.unwrap());
    }

    #[tokio::test]
    async fn test_wrong_key_leaves_session_untouched() {
        let session = test_session();
        authenticate(&session, "ALPHA-88", &test_key(), NOW)
            .await
            .unwrap();

        let result = authenticate(&session, "wrong", &test_key(), NOW).await;
        assert!(matches!(result, Err(SessionError::InvalidKey)));

        // The earlier unlock is still there.
        assert!(is_authenticated(&session, NOW + 1000).await.unwrap());
    }

    #[tokio::test]
    async fn test_wrong_key_without_prior_session() {
        let session = test_session();
        let result = authenticate(&session, "wrong", &test_key(), NOW).await;
        assert!(matches!(result, Err(SessionError::InvalidKey)));
        assert!(!is_authenticated(&session, NOW).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_session_clears_on_read() {
        let session = test_session();
        authenticate(&session, "ALPHA-88", &test_key(), NOW)
            .await
            .unwrap();

        // Read past the expiry: reports false and self-heals.
        let later = NOW + SESSION_TTL_MS;
        assert!(!is_authenticated(&session, later).await.unwrap());

        // Both keys are gone, so even a rolled-back clock stays locked.
        assert!(!is_authenticated(&session, NOW).await.unwrap());
        let flag: Option<String> = session.get(keys::ADMIN_AUTHENTICATED).await.unwrap();
        assert!(flag.is_none());
    }

    #[tokio::test]
    async fn test_malformed_record_clears_on_read() {
        let session = test_session();
        // Flag present but no expiry key at all.
        session
            .insert(keys::ADMIN_AUTHENTICATED, "true".to_string())
            .await
            .unwrap();

        assert!(!is_authenticated(&session, NOW).await.unwrap());
        let flag: Option<String> = session.get(keys::ADMIN_AUTHENTICATED).await.unwrap();
        assert!(flag.is_none());
    }

    #[tokio::test]
    async fn test_logout_clears() {
        let session = test_session();
        authenticate(&session, "ALPHA-88", &test_key(), NOW)
            .await
            .unwrap();
        logout(&session).await.unwrap();
        assert!(!is_authenticated(&session, NOW).await.unwrap());
    }
}
