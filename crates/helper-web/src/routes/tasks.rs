//! Accepted-task CRUD and the available-tasks snapshot publish.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use database::models::{AvailableTask, Task};
use database::{available_task, task, NewTask};

use crate::error::Result;
use crate::state::AppState;

/// Request to accept a task from the map (or a custom one without `id`).
#[derive(Deserialize)]
pub struct AcceptTaskRequest {
    /// Synthetic map id, when accepting from the map.
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward: i64,
    pub lat: f64,
    pub lng: f64,
}

/// Accept response.
#[derive(Serialize)]
pub struct AcceptTaskResponse {
    pub success: bool,
    pub task: Task,
}

/// Accept a task. Re-accepting the same map id is a no-op returning success.
pub async fn accept_task(
    State(state): State<AppState>,
    Json(req): Json<AcceptTaskRequest>,
) -> Result<Json<AcceptTaskResponse>> {
    let new_task = NewTask {
        title: req.title,
        description: req.description,
        reward: req.reward,
        lat: req.lat,
        lng: req.lng,
        original_id: req.id,
    };

    let accepted = task::accept_task(state.db.pool(), &new_task).await?;
    info!(task_id = accepted.id, title = %accepted.title, "Task accepted");

    Ok(Json(AcceptTaskResponse {
        success: true,
        task: accepted,
    }))
}

/// Task list response.
#[derive(Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<Task>,
}

/// List the user's accepted tasks, newest first.
pub async fn my_tasks(State(state): State<AppState>) -> Result<Json<TaskListResponse>> {
    let tasks = task::list_tasks(state.db.pool()).await?;
    Ok(Json(TaskListResponse { tasks }))
}

/// Generic success response.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Delete an accepted task.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>> {
    task::delete_task(state.db.pool(), id).await?;
    info!(task_id = id, "Task deleted");
    Ok(Json(SuccessResponse { success: true }))
}

/// A task as the client renders it on the map.
#[derive(Deserialize)]
pub struct PublishedTask {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub reward: i64,
    pub lat: f64,
    pub lng: f64,
}

/// Request to publish the client's current map tasks.
#[derive(Deserialize)]
pub struct StoreAvailableTasksRequest {
    pub tasks: Vec<PublishedTask>,
}

/// Publish response.
#[derive(Serialize)]
pub struct StoreAvailableTasksResponse {
    pub success: bool,
    pub count: usize,
}

/// Replace the available-tasks snapshot with whatever the client sent.
pub async fn store_available_tasks(
    State(state): State<AppState>,
    Json(req): Json<StoreAvailableTasksRequest>,
) -> Result<Json<StoreAvailableTasksResponse>> {
    let tasks: Vec<AvailableTask> = req
        .tasks
        .into_iter()
        .map(|t| AvailableTask {
            map_id: t.id,
            title: t.title,
            description: t.description,
            reward: t.reward,
            lat: t.lat,
            lng: t.lng,
        })
        .collect();

    let count = tasks.len();
    available_task::replace_all(state.db.pool(), &tasks).await?;

    Ok(Json(StoreAvailableTasksResponse {
        success: true,
        count,
    }))
}
