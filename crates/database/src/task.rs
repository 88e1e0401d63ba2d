//! Accepted-task operations.

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Task;

/// Input for accepting a task.
#[derive(Debug, Clone)]
pub struct NewTask {
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
    /// Synthetic map id, when accepted from the map.
    pub original_id: Option<i64>,
}

/// Accept a task, idempotently when it carries a map id.
///
/// Accepting the same `original_id` twice inserts exactly one row; both
/// calls return the persisted task.
pub async fn accept_task(pool: &SqlitePool, task: &NewTask) -> Result<Task> {
    if let Some(original_id) = task.original_id {
        sqlx::query(
            r#"
            INSERT INTO tasks (title, description, reward, lat, lng, original_id)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(original_id) DO NOTHING
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.reward)
        .bind(task.lat)
        .bind(task.lng)
        .bind(original_id)
        .execute(pool)
        .await?;

        get_task_by_original_id(pool, original_id).await
    } else {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, reward, lat, lng)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.reward)
        .bind(task.lat)
        .bind(task.lng)
        .execute(pool)
        .await?;

        get_task(pool, result.last_insert_rowid()).await
    }
}

/// Get a task by ID.
pub async fn get_task(pool: &SqlitePool, id: i64) -> Result<Task> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, reward, lat, lng, status, original_id, timestamp
        FROM tasks
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Task",
        id: id.to_string(),
    })
}

/// Get a task by the synthetic map id it was accepted from.
pub async fn get_task_by_original_id(pool: &SqlitePool, original_id: i64) -> Result<Task> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, reward, lat, lng, status, original_id, timestamp
        FROM tasks
        WHERE original_id = ?
        "#,
    )
    .bind(original_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Task",
        id: original_id.to_string(),
    })
}

/// List all accepted tasks, newest first.
pub async fn list_tasks(pool: &SqlitePool) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, reward, lat, lng, status, original_id, timestamp
        FROM tasks
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// The most recently accepted tasks, newest first.
pub async fn recent_tasks(pool: &SqlitePool, limit: i64) -> Result<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>(
        r#"
        SELECT id, title, description, reward, lat, lng, status, original_id, timestamp
        FROM tasks
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Delete an accepted task by ID.
pub async fn delete_task(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Task",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Summary statistics over the accepted tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskStats {
    /// Number of accepted tasks.
    pub total_tasks: i64,
    /// Mean reward, rounded to cents. Zero when there are no tasks.
    pub average_reward: f64,
    /// Task count per lifecycle status.
    pub by_status: BTreeMap<String, i64>,
}

/// Compute count, average reward, and a per-status breakdown.
pub async fn stats(pool: &SqlitePool) -> Result<TaskStats> {
    let (total, average): (i64, Option<f64>) =
        sqlx::query_as("SELECT COUNT(*), AVG(reward) FROM tasks")
            .fetch_one(pool)
            .await?;

    let statuses: Vec<(String, i64)> =
        sqlx::query_as("SELECT status, COUNT(*) FROM tasks GROUP BY status")
            .fetch_all(pool)
            .await?;

    Ok(TaskStats {
        total_tasks: total,
        average_reward: average.map(|a| (a * 100.0).round() / 100.0).unwrap_or(0.0),
        by_status: statuses.into_iter().collect(),
    })
}

/// Map ids of every task accepted from the map. Fed to the generator as
/// its exclusion set.
pub async fn accepted_original_ids(pool: &SqlitePool) -> Result<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT original_id FROM tasks
        WHERE original_id IS NOT NULL
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(ids)
}
