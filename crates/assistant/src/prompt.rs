//! System prompt and per-turn context assembly.

use sqlx::SqlitePool;

use database::error::DatabaseError;
use database::{available_task, task, user};

use crate::error::AssistantError;
use crate::tools::annotate_and_sort;

/// Number of recently accepted tasks embedded in the context block.
const RECENT_TASKS: i64 = 10;

/// The assistant's fixed persona.
pub const SYSTEM_PROMPT: &str = "\
You are the AI assistant for \"Find a Helper\", a community task marketplace \
where people post tasks they need help with, and helpers accept them.

Your role:
- Help users find relevant tasks
- Answer questions about the platform
- Give advice on pricing, task descriptions, and being a good helper/requester
- Be friendly, concise, and helpful

You have access to the user's profile, their accepted tasks, and the tasks \
currently shown on their map. Use the available tools to look tasks up before \
answering questions about them.

Keep responses SHORT (2-3 sentences max) unless the user asks for detail.";

/// Build the full system prompt: persona plus a context block with the user
/// profile, their recent accepted tasks, and the current map snapshot.
pub async fn build_system_prompt(
    pool: &SqlitePool,
    user_id: i64,
    location: Option<(f64, f64)>,
) -> Result<String, AssistantError> {
    let user_context = user_context(pool, user_id).await?;
    let tasks_context = tasks_context(pool).await?;
    let snapshot_context = snapshot_context(pool, location).await?;

    Ok(format!(
        "{}\n\n--- Context ---\n{}\n\n{}\n\n{}",
        SYSTEM_PROMPT, user_context, tasks_context, snapshot_context
    ))
}

async fn user_context(pool: &SqlitePool, user_id: i64) -> Result<String, AssistantError> {
    match user::get_user(pool, user_id).await {
        Ok(user) => Ok(format!(
            "Current user: {}\nRole: {}\nBio: {}\nExpertise: {}\nJoined: {}",
            user.username,
            user.role,
            user.bio.as_deref().unwrap_or("N/A"),
            user.expertise.as_deref().unwrap_or("N/A"),
            user.joined_date,
        )),
        Err(DatabaseError::NotFound { .. }) => Ok("No user profile found.".to_string()),
        Err(err) => Err(err.into()),
    }
}

async fn tasks_context(pool: &SqlitePool) -> Result<String, AssistantError> {
    let tasks = task::recent_tasks(pool, RECENT_TASKS).await?;
    if tasks.is_empty() {
        return Ok("No accepted tasks yet.".to_string());
    }

    let mut lines = vec!["Accepted tasks:".to_string()];
    for t in tasks {
        lines.push(format!("- {} (${}): {}", t.title, t.reward, t.description));
    }
    Ok(lines.join("\n"))
}

async fn snapshot_context(
    pool: &SqlitePool,
    location: Option<(f64, f64)>,
) -> Result<String, AssistantError> {
    let tasks = available_task::list_all(pool).await?;
    if tasks.is_empty() {
        return Ok("No tasks are currently shown on the map.".to_string());
    }

    let found = annotate_and_sort(tasks, location);
    let mut lines = vec!["Tasks currently on the user's map:".to_string()];
    for t in found {
        let mut line = format!("- [id {}] {} (${}): {}", t.id, t.title, t.reward, t.description);
        if let Some(distance) = t.distance_km {
            line.push_str(&format!(" ({:.1} km away)", distance));
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
