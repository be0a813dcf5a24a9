//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Marquee figure shown when the gateway count is unavailable.
pub const COUNT_FALLBACK: u64 = 4203;

/// Landing page template (public view).
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub waitlist_count: u64,
}

/// Landing page handler.
///
/// The marquee count comes from the gateway; a failed count never blocks
/// the page and falls back to a fixed figure.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> HomeTemplate {
    let waitlist_count = match state.supabase().count().await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "waitlist count unavailable, using fallback");
            COUNT_FALLBACK
        }
    };

    HomeTemplate { waitlist_count }
}
