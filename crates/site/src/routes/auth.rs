//! Access-key authentication route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::AppError;
use crate::session::{self, SessionError};
use crate::state::AppState;

/// Access-key form data (the modal on the landing page).
#[derive(Debug, Deserialize)]
pub struct AccessForm {
    pub access_key: String,
}

/// Error fragment shown inside the access modal.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login_error.html")]
pub struct LoginErrorTemplate {
    pub message: String,
}

/// Authenticate with the access key (HTMX).
///
/// On a match the session is unlocked for eight hours and the client is
/// sent to the dashboard. On a mismatch the modal shows an inline error
/// and any previously unlocked session is left untouched.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AccessForm>,
) -> Response {
    let result = session::authenticate(
        &session,
        form.access_key.trim(),
        &state.config().admin_access_key,
        session::now_ms(),
    )
    .await;

    match result {
        Ok(()) => {
            tracing::info!("admin session unlocked");
            // HTMX picks this header up and performs a full navigation.
            ([("HX-Redirect", "/dashboard")], "").into_response()
        }
        Err(SessionError::InvalidKey) => LoginErrorTemplate {
            message: "Invalid access key".to_string(),
        }
        .into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Clear the admin session and return to the public view.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session::logout(&session).await?;
    Ok(Redirect::to("/"))
}
