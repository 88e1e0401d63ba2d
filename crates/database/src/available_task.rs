//! Available-tasks snapshot operations.
//!
//! The snapshot mirrors whatever tasks the client currently renders and is
//! replaced wholesale on each publish. It is read-only to the assistant.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::AvailableTask;

/// Replace the entire snapshot with the given tasks.
pub async fn replace_all(pool: &SqlitePool, tasks: &[AvailableTask]) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM available_tasks")
        .execute(&mut *tx)
        .await?;

    for task in tasks {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO available_tasks (map_id, title, description, reward, lat, lng)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(task.map_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.reward)
        .bind(task.lat)
        .bind(task.lng)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(count = tasks.len(), "Replaced available-tasks snapshot");
    Ok(())
}

/// List the full snapshot.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<AvailableTask>> {
    let tasks = sqlx::query_as::<_, AvailableTask>(
        r#"
        SELECT map_id, title, description, reward, lat, lng
        FROM available_tasks
        ORDER BY map_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Substring search over title and description (SQL LIKE, ASCII
/// case-insensitive).
pub async fn search(pool: &SqlitePool, keyword: &str) -> Result<Vec<AvailableTask>> {
    let pattern = format!("%{}%", keyword);

    let tasks = sqlx::query_as::<_, AvailableTask>(
        r#"
        SELECT map_id, title, description, reward, lat, lng
        FROM available_tasks
        WHERE title LIKE ? OR description LIKE ?
        ORDER BY map_id
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Look up a snapshot row by map id.
pub async fn get(pool: &SqlitePool, map_id: i64) -> Result<Option<AvailableTask>> {
    let task = sqlx::query_as::<_, AvailableTask>(
        r#"
        SELECT map_id, title, description, reward, lat, lng
        FROM available_tasks
        WHERE map_id = ?
        "#,
    )
    .bind(map_id)
    .fetch_optional(pool)
    .await?;

    Ok(task)
}
