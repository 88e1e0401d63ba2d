//! HTTP API server for the Find a Helper task marketplace.
//!
//! Serves the map/nearby endpoints, task CRUD, the AI assistant chat, and
//! the demo direct-message endpoints.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use assistant::Assistant;
use database::Database;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting Find a Helper server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Ensure the demo user exists
    let user = database::user::seed_demo_user(db.pool()).await?;
    info!(user = %user.username, "Demo user ready");

    // The assistant is optional: without an API key the chat endpoint
    // responds with a warning instead of failing.
    let assistant = match Assistant::from_env() {
        Ok(assistant) => Some(Arc::new(assistant)),
        Err(err) => {
            warn!(error = %err, "AI assistant disabled");
            None
        }
    };

    // Build application state
    let state = AppState::new(db, assistant);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Find a Helper server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
