//! Application state shared across handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::SiteConfig;
use crate::fence::SubmissionFence;
use crate::services::{SupabaseClient, SupabaseError};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the gateway
/// client, the submission fence, and the location of the dashboard shell.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    supabase: SupabaseClient,
    fence: SubmissionFence,
    dashboard_shell: PathBuf,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway client cannot be constructed.
    pub fn new(config: SiteConfig, dashboard_shell: &Path) -> Result<Self, SupabaseError> {
        let supabase = SupabaseClient::new(&config.supabase)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                supabase,
                fence: SubmissionFence::default(),
                dashboard_shell: dashboard_shell.to_path_buf(),
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the Supabase gateway client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// Get a reference to the submission fence.
    #[must_use]
    pub fn fence(&self) -> &SubmissionFence {
        &self.inner.fence
    }

    /// Path of the static dashboard shell document.
    #[must_use]
    pub fn dashboard_shell(&self) -> &Path {
        &self.inner.dashboard_shell
    }
}
