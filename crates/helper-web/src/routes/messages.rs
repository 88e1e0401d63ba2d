//! Demo direct messages with a canned auto-reply.

use axum::extract::State;
use axum::Json;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use database::direct_message;
use database::models::DirectMessage;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Canned replies the simulated recipient answers with. Picked with the
/// thread RNG, never the seeded map generator.
const AUTO_REPLIES: &[&str] = &[
    "Sounds good, I'll be there!",
    "Can you share a few more details?",
    "Thanks for reaching out, let me check my schedule.",
    "Sure thing. What time works for you?",
    "Got it. I'll follow up shortly.",
];

/// Request to send a direct message.
#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub recipient: String,
    pub content: String,
}

/// Send response, including the simulated reply.
#[derive(Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub message: DirectMessage,
    pub reply: DirectMessage,
}

/// Send a message and immediately record a canned reply from the recipient.
pub async fn send(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>> {
    if req.recipient.trim().is_empty() || req.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Recipient and content are required".to_string(),
        ));
    }

    let pool = state.db.pool();
    let user = database::user::get_demo_user(pool).await?;

    let message =
        direct_message::append(pool, &user.username, &req.recipient, &req.content).await?;

    let canned = AUTO_REPLIES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(AUTO_REPLIES[0]);
    let reply = direct_message::append(pool, &req.recipient, &user.username, canned).await?;

    Ok(Json(SendMessageResponse {
        success: true,
        message,
        reply,
    }))
}

/// Message list response.
#[derive(Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<DirectMessage>,
}

/// All direct messages, oldest first.
pub async fn list(State(state): State<AppState>) -> Result<Json<MessageListResponse>> {
    let messages = direct_message::list_all(state.db.pool()).await?;
    Ok(Json(MessageListResponse { messages }))
}
