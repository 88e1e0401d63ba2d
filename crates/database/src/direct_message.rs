//! Demo direct-message operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::DirectMessage;

/// Store a direct message and return the persisted row.
pub async fn append(
    pool: &SqlitePool,
    sender: &str,
    recipient: &str,
    content: &str,
) -> Result<DirectMessage> {
    let result = sqlx::query(
        r#"
        INSERT INTO direct_messages (sender, recipient, content)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(sender)
    .bind(recipient)
    .bind(content)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    sqlx::query_as::<_, DirectMessage>(
        r#"
        SELECT id, sender, recipient, content, timestamp
        FROM direct_messages
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "DirectMessage",
        id: id.to_string(),
    })
}

/// All direct messages, oldest first.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<DirectMessage>> {
    let messages = sqlx::query_as::<_, DirectMessage>(
        r#"
        SELECT id, sender, recipient, content, timestamp
        FROM direct_messages
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(messages)
}
