//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Landing page (public view)
//! GET  /health            - Health check
//!
//! # Waitlist (HTMX fragments)
//! POST /waitlist          - Submit the signup form
//! GET  /waitlist/count    - Marquee count fragment
//!
//! # Admin gate
//! POST /login             - Access-key authentication
//! POST /logout            - Clear the session
//!
//! # Dashboard (requires unlocked session)
//! GET  /dashboard         - Dashboard page (shell region + chrome)
//! GET  /dashboard/stats   - Stats cards fragment
//! GET  /dashboard/entries - Recent signups table fragment
//! ```

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod waitlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/stats", get(dashboard::stats))
        .route("/entries", get(dashboard::entries))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public view
        .route("/", get(home::home))
        // Waitlist pipeline
        .route("/waitlist", post(waitlist::join))
        .route("/waitlist/count", get(waitlist::count))
        // Admin gate
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Dashboard view
        .nest("/dashboard", dashboard_routes())
}
