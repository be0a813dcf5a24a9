//! Dashboard route handlers.
//!
//! The dashboard shell ships as a static HTML document; entry extracts the
//! `dashboard-view` region from it and injects it into the page chrome.
//! The two data projections (stats cards and recent signups) are separate
//! fragments the shell loads on entry.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::fragment;
use crate::middleware::RequireAdmin;
use crate::services::WaitlistRecord;
use crate::state::AppState;

/// Id of the shell region that becomes the dashboard view.
pub const REGION_ID: &str = "dashboard-view";

/// How many recent signups the table shows.
pub const RECENT_LIMIT: usize = 10;

/// Count shown when the gateway stats call fails.
const STATS_COUNT_FALLBACK: u64 = 4204;

// Client ad-account rollups are not wired up; these are the fixed figures
// the stats cards show alongside the live waitlist count.
const TOTAL_REVENUE: u64 = 4_291_040;
const ACTIVE_AD_SPEND: u64 = 142_800;
const GLOBAL_ROAS: f64 = 4.82;

/// Dashboard page template: chrome around the extracted shell region.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub content: String,
}

/// Stats cards fragment.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/stats.html")]
pub struct StatsTemplate {
    pub waitlist_count: u64,
    pub total_revenue: u64,
    pub active_ad_spend: u64,
    pub global_roas: String,
}

/// One row of the recent signups table.
#[derive(Debug, Clone)]
pub struct EntryRowView {
    pub name: String,
    pub email: String,
    pub revenue: String,
    pub joined: String,
    pub status: &'static str,
}

impl From<&WaitlistRecord> for EntryRowView {
    fn from(record: &WaitlistRecord) -> Self {
        Self {
            name: format!("{} {}", record.first_name, record.last_name),
            email: record.email.clone(),
            revenue: record
                .monthly_revenue
                .clone()
                .unwrap_or_else(|| "—".to_string()),
            joined: record.created_at.format("%b %d, %Y").to_string(),
            status: record.status.unwrap_or_default().label(),
        }
    }
}

/// Recent signups table fragment.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/entries.html")]
pub struct EntriesTemplate {
    pub rows: Vec<EntryRowView>,
}

/// Dashboard page handler.
///
/// A shell missing its `dashboard-view` region is surfaced as an explicit
/// error response; the public view is never silently re-shown.
#[instrument(skip(_admin, state))]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> Result<DashboardTemplate> {
    let shell = tokio::fs::read_to_string(state.dashboard_shell())
        .await
        .map_err(|e| {
            tracing::error!(path = %state.dashboard_shell().display(), error = %e, "dashboard shell unreadable");
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::NotFound("dashboard shell".to_string())
            } else {
                AppError::Internal(format!("dashboard shell unreadable: {e}"))
            }
        })?;

    let content = fragment::extract_region(&shell, REGION_ID)?;
    Ok(DashboardTemplate { content })
}

/// Stats cards fragment handler.
#[instrument(skip(_admin, state))]
pub async fn stats(_admin: RequireAdmin, State(state): State<AppState>) -> StatsTemplate {
    let waitlist_count = match state.supabase().count().await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "stats count unavailable, using fallback");
            STATS_COUNT_FALLBACK
        }
    };

    StatsTemplate {
        waitlist_count,
        total_revenue: TOTAL_REVENUE,
        active_ad_spend: ACTIVE_AD_SPEND,
        global_roas: format!("{GLOBAL_ROAS:.2}x"),
    }
}

/// Recent signups table fragment handler.
#[instrument(skip(_admin, state))]
pub async fn entries(_admin: RequireAdmin, State(state): State<AppState>) -> Result<EntriesTemplate> {
    let records = state.supabase().recent(RECENT_LIMIT).await?;
    let rows = records.iter().map(EntryRowView::from).collect();
    Ok(EntriesTemplate { rows })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use scalebound_core::EntryStatus;

    fn record(status: Option<EntryStatus>) -> WaitlistRecord {
        WaitlistRecord {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            monthly_revenue: Some("10k".to_string()),
            created_at: chrono::Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).single().unwrap_or_default(),
            status,
        }
    }

    #[test]
    fn test_row_view_formats_fields() {
        let row = EntryRowView::from(&record(Some(EntryStatus::Invited)));
        assert_eq!(row.name, "Jane Doe");
        assert_eq!(row.joined, "Aug 01, 2026");
        assert_eq!(row.status, "invited");
        assert_eq!(row.revenue, "10k");
    }

    #[test]
    fn test_row_view_status_defaults_to_pending() {
        let row = EntryRowView::from(&record(None));
        assert_eq!(row.status, "pending");
    }
}
