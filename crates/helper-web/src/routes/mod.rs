//! Route handlers for the API server.

pub mod chat;
pub mod geolocate;
pub mod health;
pub mod messages;
pub mod nearby;
pub mod profile;
pub mod tasks;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Map
        .route("/api/nearby", get(nearby::nearby))
        .route("/api/store_available_tasks", post(tasks::store_available_tasks))
        // Accepted tasks
        .route("/api/accept_task", post(tasks::accept_task))
        .route("/api/my_tasks", get(tasks::my_tasks))
        .route("/api/delete_task/:id", delete(tasks::delete_task))
        // Assistant chat
        .route("/api/chat", post(chat::chat))
        .route("/api/chat/history", get(chat::history))
        .route("/api/clear_chat", post(chat::clear))
        // Profile
        .route("/api/user", get(profile::get_user))
        .route("/api/update_user", post(profile::update_user))
        // Demo direct messages
        .route("/api/messages", get(messages::list))
        .route("/api/send_message", post(messages::send))
        // Geolocation proxy
        .route("/api/geolocate", get(geolocate::geolocate))
}
