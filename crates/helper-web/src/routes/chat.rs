//! Assistant chat routes.
//!
//! Assistant failures never fail the request: a missing API key or an
//! upstream error becomes a warning string in the reply with HTTP 200.

use std::sync::Arc;

use assistant::{Assistant, ChatOutcome, ChatTurn, FoundTask};
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use database::chat_message;
use database::models::ChatMessage;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// History window used when no assistant (and thus no configuration) exists.
const DEFAULT_HISTORY_WINDOW: usize = 6;

/// Number of stored messages to feed the assistant, per its configuration.
fn history_window(assistant: Option<&Arc<Assistant>>) -> i64 {
    assistant
        .map(|a| a.config().max_history_messages)
        .unwrap_or(DEFAULT_HISTORY_WINDOW) as i64
}

/// A chat turn from the client.
#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub user_lat: Option<f64>,
    pub user_lng: Option<f64>,
}

/// Structured chat reply.
#[derive(Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub highlight_task_id: Option<i64>,
    pub found_tasks: Vec<FoundTask>,
}

/// Run one chat turn and persist both sides of the exchange.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let pool = state.db.pool();
    let user = database::user::get_demo_user(pool).await?;

    let location = match (req.user_lat, req.user_lng) {
        (Some(lat), Some(lng)) => Some((lat, lng)),
        _ => None,
    };

    let window = history_window(state.assistant.as_ref());
    let history = chat_message::recent(pool, user.id, window).await?;

    let outcome = match &state.assistant {
        None => warning_outcome(
            "The AI assistant is not configured. Set OPENAI_API_KEY to enable chat.",
        ),
        Some(assistant) => {
            let turn = ChatTurn {
                message: req.message.clone(),
                user_id: user.id,
                location,
            };
            match assistant.chat(pool, &turn, &history).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(error = %err, "Assistant call failed");
                    warning_outcome(&format!("Sorry, the assistant ran into a problem: {}", err))
                }
            }
        }
    };

    chat_message::append(pool, user.id, "user", &req.message).await?;
    chat_message::append(pool, user.id, "assistant", &outcome.reply).await?;

    Ok(Json(ChatResponse {
        reply: outcome.reply,
        highlight_task_id: outcome.highlight_task_id,
        found_tasks: outcome.found_tasks,
    }))
}

fn warning_outcome(message: &str) -> ChatOutcome {
    ChatOutcome {
        reply: message.to_string(),
        highlight_task_id: None,
        found_tasks: Vec::new(),
    }
}

/// Chat history response.
#[derive(Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}

/// Full chat log, oldest first.
pub async fn history(State(state): State<AppState>) -> Result<Json<HistoryResponse>> {
    let pool = state.db.pool();
    let user = database::user::get_demo_user(pool).await?;
    let messages = chat_message::list_all(pool, user.id).await?;
    Ok(Json(HistoryResponse { messages }))
}

/// Clear-chat response.
#[derive(Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

/// Delete the chat log.
pub async fn clear(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let pool = state.db.pool();
    let user = database::user::get_demo_user(pool).await?;
    chat_message::clear(pool, user.id).await?;
    Ok(Json(ClearResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use assistant::AssistantConfig;

    use super::*;

    #[test]
    fn test_history_window_follows_assistant_config() {
        assert_eq!(history_window(None), 6);

        let config = AssistantConfig::builder()
            .api_key("test-key")
            .max_history_messages(10)
            .build();
        let assistant = Arc::new(Assistant::new(config).unwrap());
        assert_eq!(history_window(Some(&assistant)), 10);
    }
}
