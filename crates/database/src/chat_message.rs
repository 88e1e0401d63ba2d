//! Chat message log operations. Append-only; the conversation history fed
//! to the assistant is the most-recent-N window.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::ChatMessage;

/// Append a message to a user's chat log.
pub async fn append(pool: &SqlitePool, user_id: i64, role: &str, content: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO chat_messages (user_id, role, content)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(role)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(())
}

/// Full chat log for a user, oldest first.
pub async fn list_all(pool: &SqlitePool, user_id: i64) -> Result<Vec<ChatMessage>> {
    let messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, user_id, role, content, timestamp
        FROM chat_messages
        WHERE user_id = ?
        ORDER BY id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// The last `limit` messages for a user, in chronological order.
pub async fn recent(pool: &SqlitePool, user_id: i64, limit: i64) -> Result<Vec<ChatMessage>> {
    let mut messages = sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT id, user_id, role, content, timestamp
        FROM chat_messages
        WHERE user_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    messages.reverse();
    Ok(messages)
}

/// Delete a user's entire chat log.
pub async fn clear(pool: &SqlitePool, user_id: i64) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM chat_messages
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}
