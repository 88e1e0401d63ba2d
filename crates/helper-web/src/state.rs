//! Application state shared across handlers.

use std::sync::Arc;

use assistant::Assistant;
use database::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// AI assistant, absent when no API key is configured.
    pub assistant: Option<Arc<Assistant>>,
    /// HTTP client for outbound lookups (geolocation).
    pub http: reqwest::Client,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, assistant: Option<Arc<Assistant>>) -> Self {
        Self {
            db,
            assistant,
            http: reqwest::Client::new(),
        }
    }
}
