//! Supabase PostgREST client for the waitlist collection.
//!
//! The site keeps no local database; the hosted gateway owns the records.
//! This client covers the four operations the site consumes: insert one
//! entry, exact count, most-recent-N, and lookup by email. Every call is
//! attempted exactly once, no retries.

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use scalebound_core::{EntryStatus, WaitlistEntry};

use crate::config::SupabaseConfig;

/// REST path of the waitlist collection.
const WAITLIST_PATH: &str = "/rest/v1/waitlist";

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A waitlist record as returned by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitlistRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub monthly_revenue: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Absent on legacy rows; the dashboard badge falls back to "pending".
    #[serde(default)]
    pub status: Option<EntryStatus>,
}

/// Supabase PostgREST client.
#[derive(Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Create a new gateway client.
    ///
    /// The anonymous key is carried as both the `apikey` header and a
    /// bearer token on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &SupabaseConfig) -> Result<Self, SupabaseError> {
        let key = config.anon_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key)
                .map_err(|e| SupabaseError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|e| SupabaseError::Parse(format!("Invalid API key format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}{WAITLIST_PATH}", config.url),
        })
    }

    /// Insert one waitlist entry, returning the stored record.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error text on a rejected insert; that text is
    /// shown to the user verbatim by the submission pipeline.
    pub async fn insert(&self, entry: &WaitlistEntry) -> Result<WaitlistRecord, SupabaseError> {
        let response = self
            .client
            .post(&self.base_url)
            .header("Prefer", "return=representation")
            .json(&[entry])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let records: Vec<WaitlistRecord> = response
            .json()
            .await
            .map_err(|e| SupabaseError::Parse(e.to_string()))?;

        records
            .into_iter()
            .next()
            .ok_or_else(|| SupabaseError::Parse("insert returned no record".to_string()))
    }

    /// Exact count of waitlist records.
    ///
    /// Issues a HEAD request with `Prefer: count=exact` and parses the
    /// total from the `Content-Range` header.
    ///
    /// # Errors
    ///
    /// Returns an error on a failed request or a missing/malformed header.
    pub async fn count(&self) -> Result<u64, SupabaseError> {
        let url = format!("{}?select=*", self.base_url);
        let response = self
            .client
            .head(&url)
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message: "count request failed".to_string(),
            });
        }

        let header = response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| SupabaseError::Parse("missing Content-Range header".to_string()))?;

        parse_content_range(header)
    }

    /// The `limit` most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error on a failed request or unparseable body.
    pub async fn recent(&self, limit: usize) -> Result<Vec<WaitlistRecord>, SupabaseError> {
        let url = format!(
            "{}?select=*&order=created_at.desc&limit={limit}",
            self.base_url
        );
        self.fetch_records(&url).await
    }

    /// Look up an entry by exact (already lower-cased) email.
    ///
    /// # Errors
    ///
    /// Returns an error on a failed request or unparseable body.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<WaitlistRecord>, SupabaseError> {
        let url = format!(
            "{}?select=*&email=eq.{}&limit=1",
            self.base_url,
            urlencoding::encode(email)
        );
        Ok(self.fetch_records(&url).await?.into_iter().next())
    }

    async fn fetch_records(&self, url: &str) -> Result<Vec<WaitlistRecord>, SupabaseError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SupabaseError::Parse(e.to_string()))
    }
}

/// Parse the total out of a PostgREST `Content-Range` header.
///
/// The header looks like `0-9/42`, or `*/0` for an empty collection.
fn parse_content_range(header: &str) -> Result<u64, SupabaseError> {
    header
        .rsplit('/')
        .next()
        .and_then(|total| total.parse::<u64>().ok())
        .ok_or_else(|| SupabaseError::Parse(format!("malformed Content-Range: {header}")))
}
