//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Route handlers that don't render an inline
//! fragment return `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::fragment::FragmentError;
use crate::services::SupabaseError;
use crate::session::SessionError;

/// Application-level error type for the site.
#[derive(Debug, Error)]
pub enum AppError {
    /// Remote data gateway operation failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] SupabaseError),

    /// Session gate operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Dashboard shell region extraction failed.
    #[error("Fragment error: {0}")]
    Fragment(#[from] FragmentError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry
        if matches!(
            self,
            Self::Gateway(_) | Self::Fragment(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::Session(SessionError::InvalidKey) => StatusCode::UNAUTHORIZED,
            Self::Session(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Fragment(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Gateway(_) => "External service error".to_string(),
            Self::Session(SessionError::InvalidKey) => "Invalid access key".to_string(),
            Self::Session(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Fragment(_) => "Dashboard is temporarily unavailable".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("dashboard shell".to_string());
        assert_eq!(err.to_string(), "Not found: dashboard shell");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Session(SessionError::InvalidKey)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Fragment(FragmentError::RegionNotFound(
                "dashboard-view".to_string()
            ))),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
