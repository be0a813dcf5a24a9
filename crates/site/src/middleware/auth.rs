//! Authentication extractor for the admin dashboard.
//!
//! The gate's validity check runs on every protected-view entry, including
//! its self-healing clear of expired records.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::session;

/// Extractor that requires an unlocked admin session.
///
/// If the session is locked (or has just expired), HTML requests are
/// redirected back to the public view and API-style requests get 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "command center"
/// }
/// ```
pub struct RequireAdmin;

/// Error returned when the dashboard is requested without a valid session.
pub enum AdminRejection {
    /// Redirect to the public view (for HTML requests).
    RedirectToPublic,
    /// Unauthorized response (for fragment/API requests).
    Unauthorized,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToPublic => Redirect::to("/").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AdminRejection::Unauthorized)?;

        let unlocked = session::is_authenticated(&session, session::now_ms())
            .await
            .unwrap_or(false);

        if unlocked {
            Ok(Self)
        } else {
            // Dashboard fragments are loaded over HTMX; a redirect inside a
            // fragment swap would splice the landing page into the table.
            let is_fragment = parts
                .uri
                .path()
                .strip_prefix("/dashboard/")
                .is_some_and(|rest| !rest.is_empty());
            if is_fragment {
                Err(AdminRejection::Unauthorized)
            } else {
                Err(AdminRejection::RedirectToPublic)
            }
        }
    }
}
