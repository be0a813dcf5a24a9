//! Waitlist submission route handlers.
//!
//! The submission pipeline runs validate, duplicate check, insert, in that
//! order, short-circuiting to an inline error fragment at the first
//! failure. No gateway call is made for a draft that fails validation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use scalebound_core::WaitlistDraft;

use crate::filters;
use crate::routes::home::COUNT_FALLBACK;
use crate::services::SupabaseError;
use crate::state::AppState;

/// How long the success message stays visible, in milliseconds. Error
/// messages persist until the next attempt.
pub const SUCCESS_VISIBLE_MS: u64 = 5000;

const MSG_SUCCESS: &str =
    "Success! You've been added to the waitlist. Position will be confirmed via email.";
const MSG_DUPLICATE: &str = "This email is already on our waitlist!";
const MSG_GENERIC: &str = "An error occurred. Please try again.";

/// Waitlist signup form data.
#[derive(Debug, Deserialize)]
pub struct WaitlistForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub monthly_revenue: String,
}

impl From<WaitlistForm> for WaitlistDraft {
    fn from(form: WaitlistForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            monthly_revenue: form.monthly_revenue,
        }
    }
}

/// Success fragment (replaces the message region via HTMX).
///
/// Carries a refreshed marquee count as an out-of-band swap when this
/// submission is still the latest one.
#[derive(Template, WebTemplate)]
#[template(path = "waitlist/success.html")]
pub struct WaitlistSuccessTemplate {
    pub message: String,
    pub waitlist_count: Option<u64>,
    pub autoclear_ms: u64,
}

/// Error fragment (replaces the message region via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "waitlist/error.html")]
pub struct WaitlistErrorTemplate {
    pub message: String,
}

/// Marquee count fragment.
#[derive(Template, WebTemplate)]
#[template(path = "waitlist/count.html")]
pub struct WaitlistCountTemplate {
    pub waitlist_count: u64,
}

fn error_fragment(message: impl Into<String>) -> Response {
    WaitlistErrorTemplate {
        message: message.into(),
    }
    .into_response()
}

/// Submit the waitlist form (HTMX).
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn join(State(state): State<AppState>, Form(form): Form<WaitlistForm>) -> Response {
    let ticket = state.fence().begin();

    // Validation failure makes no network call.
    let entry = match WaitlistDraft::from(form).validate(Utc::now()) {
        Ok(entry) => entry,
        Err(e) => return error_fragment(e.to_string()),
    };

    // Duplicate check; a gateway failure here is indistinguishable from a
    // duplicate to the user and surfaces the generic message.
    match state.supabase().find_by_email(entry.email.as_str()).await {
        Ok(Some(_)) => return error_fragment(MSG_DUPLICATE),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "duplicate check failed");
            return error_fragment(MSG_GENERIC);
        }
    }

    match state.supabase().insert(&entry).await {
        Ok(record) => {
            tracing::info!(email = %record.email, "waitlist signup stored");

            // Refresh the marquee count, but only apply it if no newer
            // submission has started in the meantime.
            let waitlist_count = if state.fence().is_current(ticket) {
                match state.supabase().count().await {
                    Ok(count) if state.fence().is_current(ticket) => Some(count),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!(error = %e, "count refresh failed after insert");
                        None
                    }
                }
            } else {
                None
            };

            WaitlistSuccessTemplate {
                message: MSG_SUCCESS.to_string(),
                waitlist_count,
                autoclear_ms: SUCCESS_VISIBLE_MS,
            }
            .into_response()
        }
        // The gateway's own rejection text is shown verbatim.
        Err(SupabaseError::Api { message, .. }) => {
            tracing::warn!(error = %message, "gateway rejected waitlist insert");
            error_fragment(format!("Error: {message}"))
        }
        Err(e) => {
            tracing::error!(error = %e, "waitlist insert failed");
            error_fragment(MSG_GENERIC)
        }
    }
}

/// Marquee count fragment handler.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> WaitlistCountTemplate {
    let waitlist_count = match state.supabase().count().await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "waitlist count unavailable, using fallback");
            COUNT_FALLBACK
        }
    };

    WaitlistCountTemplate { waitlist_count }
}
