//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An accepted (persisted) task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Reward in whole dollars.
    pub reward: i64,
    /// Task latitude.
    pub lat: f64,
    /// Task longitude.
    pub lng: f64,
    /// Lifecycle status ("accepted" or "completed").
    pub status: String,
    /// Synthetic map id this task was accepted from, if any.
    pub original_id: Option<i64>,
    /// Acceptance timestamp.
    pub timestamp: String,
}

/// A row of the published available-tasks snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AvailableTask {
    /// Id of the task as shown on the client map.
    pub map_id: i64,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Reward in whole dollars.
    pub reward: i64,
    /// Task latitude.
    pub lat: f64,
    /// Task longitude.
    pub lng: f64,
}

/// A user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Free-text bio.
    pub bio: Option<String>,
    /// Role on the platform ("Helper" or "Requester").
    pub role: String,
    /// Free-text expertise summary.
    pub expertise: Option<String>,
    /// Date the user joined.
    pub joined_date: String,
}

/// A persisted chat message (user or assistant turn).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Role: "user" or "assistant".
    pub role: String,
    /// Message content.
    pub content: String,
    /// Creation timestamp.
    pub timestamp: String,
}

/// A demo direct message between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DirectMessage {
    /// Auto-incrementing ID.
    pub id: i64,
    /// Sender display name.
    pub sender: String,
    /// Recipient display name.
    pub recipient: String,
    /// Message content.
    pub content: String,
    /// Creation timestamp.
    pub timestamp: String,
}
