//! The fixed toolset the model may call, and its executor.
//!
//! All tools are read-only queries. The search and highlight tools run over
//! the available-tasks snapshot; `get_task_stats` summarizes the accepted
//! tasks. Tool failures become error text in the tool result, never an
//! error from the executor.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use database::models::AvailableTask;
use database::{available_task, task};
use task_gen::distance_km;

use crate::api_types::ToolDefinition;

/// Default radius for `search_nearby_tasks`, in kilometers.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 2.0;

/// Request-scoped context tools run against. The user location is threaded
/// through explicitly; it is never process-global state.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    /// Database pool for snapshot queries.
    pub pool: &'a SqlitePool,
    /// User location as (lat, lng), when the client provided one.
    pub location: Option<(f64, f64)>,
}

/// A snapshot task as returned to the model and the client, annotated with
/// distance from the user when their location is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundTask {
    /// Map id of the task.
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
    /// Distance from the user in kilometers, if their location is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl FoundTask {
    fn from_available(task: AvailableTask, location: Option<(f64, f64)>) -> Self {
        let distance = location.map(|(lat, lng)| distance_km(lat, lng, task.lat, task.lng));
        Self {
            id: task.map_id,
            title: task.title,
            description: task.description,
            reward: task.reward,
            lat: task.lat,
            lng: task.lng,
            distance_km: distance,
        }
    }
}

/// Annotate snapshot tasks with distance and sort ascending by it when the
/// user location is known; otherwise keep the snapshot order, undistanced.
pub fn annotate_and_sort(
    tasks: Vec<AvailableTask>,
    location: Option<(f64, f64)>,
) -> Vec<FoundTask> {
    let mut found: Vec<FoundTask> = tasks
        .into_iter()
        .map(|task| FoundTask::from_available(task, location))
        .collect();

    if location.is_some() {
        found.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    found
}

/// Result of a single tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    /// Serialized result sent back to the model.
    pub content: String,
    /// Task list produced by a results-bearing tool, if any.
    pub results: Option<Vec<FoundTask>>,
    /// Map id highlighted by `highlight_task`, if it succeeded.
    pub highlight: Option<i64>,
}

impl ToolOutcome {
    fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            results: None,
            highlight: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self::text(format!("Error: {}", message.into()))
    }

    fn with_results(content: String, results: Vec<FoundTask>) -> Self {
        Self {
            content,
            results: Some(results),
            highlight: None,
        }
    }
}

/// Folds per-call tool outcomes into the values surfaced to the client.
///
/// The last results-bearing tool wins; the highlight keeps the last
/// successful `highlight_task` call. Outcomes without results or a
/// highlight leave the folded state untouched.
#[derive(Debug, Default)]
pub struct OutcomeFold {
    /// Tasks from the last results-bearing tool call.
    pub found_tasks: Vec<FoundTask>,
    /// Map id from the last successful highlight.
    pub highlight_task_id: Option<i64>,
}

impl OutcomeFold {
    /// Fold in one tool outcome.
    pub fn absorb(&mut self, outcome: &ToolOutcome) {
        if let Some(results) = &outcome.results {
            self.found_tasks = results.clone();
        }
        if outcome.highlight.is_some() {
            self.highlight_task_id = outcome.highlight;
        }
    }
}

/// The fixed tool definitions advertised on the first model pass.
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::function(
            "search_available_tasks",
            "Search the tasks currently shown on the user's map by keyword. \
             Matches task titles and descriptions.",
            json!({
                "type": "object",
                "properties": {
                    "keyword": {
                        "type": "string",
                        "description": "Keyword to search in task titles and descriptions"
                    }
                },
                "required": ["keyword"]
            }),
        ),
        ToolDefinition::function(
            "search_nearby_tasks",
            "Find tasks on the user's map within a radius of their location, \
             optionally filtered by keyword.",
            json!({
                "type": "object",
                "properties": {
                    "radius_km": {
                        "type": "number",
                        "description": "Search radius in kilometers (default 2)"
                    },
                    "keyword": {
                        "type": "string",
                        "description": "Optional keyword filter"
                    }
                }
            }),
        ),
        ToolDefinition::function(
            "list_all_tasks",
            "List every task currently shown on the user's map.",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        ToolDefinition::function(
            "highlight_task",
            "Highlight a specific task on the user's map by its id.",
            json!({
                "type": "object",
                "properties": {
                    "task_id": {
                        "type": "integer",
                        "description": "Map id of the task to highlight"
                    }
                },
                "required": ["task_id"]
            }),
        ),
        ToolDefinition::function(
            "get_task_stats",
            "Summary statistics over the user's accepted tasks: total count, \
             average reward, and a breakdown by status.",
            json!({
                "type": "object",
                "properties": {}
            }),
        ),
        ToolDefinition::function(
            "suggest_price",
            "Suggest a fair price range for a given task type.",
            json!({
                "type": "object",
                "properties": {
                    "task_type": {
                        "type": "string",
                        "description": "The type of task, e.g. 'moving', 'tutoring', 'dog walking'"
                    }
                },
                "required": ["task_type"]
            }),
        ),
    ]
}

/// Execute a tool by name with JSON-encoded arguments.
pub async fn execute(ctx: &ToolContext<'_>, name: &str, arguments_json: &str) -> ToolOutcome {
    let args: HashMap<String, Value> = match serde_json::from_str(arguments_json) {
        Ok(args) => args,
        Err(err) => return ToolOutcome::error(format!("invalid tool arguments: {}", err)),
    };

    debug!(tool = name, "Executing tool");

    match name {
        "search_available_tasks" => {
            let Some(keyword) = string_arg(&args, "keyword") else {
                return ToolOutcome::error("Missing required argument: keyword");
            };
            match available_task::search(ctx.pool, &keyword).await {
                Ok(tasks) => {
                    let found = annotate_and_sort(tasks, ctx.location);
                    results_outcome(found)
                }
                Err(err) => ToolOutcome::error(err.to_string()),
            }
        }
        "search_nearby_tasks" => {
            let Some((_, _)) = ctx.location else {
                // Soft failure: empty results plus an explanation, never an error.
                let content = json!({
                    "results": [],
                    "message": "The user's location is not available, so nearby tasks cannot be determined."
                });
                return ToolOutcome::with_results(content.to_string(), Vec::new());
            };

            let radius_km = args
                .get("radius_km")
                .and_then(Value::as_f64)
                .unwrap_or(DEFAULT_NEARBY_RADIUS_KM);

            let tasks = match string_arg(&args, "keyword") {
                Some(keyword) => available_task::search(ctx.pool, &keyword).await,
                None => available_task::list_all(ctx.pool).await,
            };

            match tasks {
                Ok(tasks) => {
                    let mut found = annotate_and_sort(tasks, ctx.location);
                    found.retain(|task| matches!(task.distance_km, Some(d) if d <= radius_km));
                    results_outcome(found)
                }
                Err(err) => ToolOutcome::error(err.to_string()),
            }
        }
        "list_all_tasks" => match available_task::list_all(ctx.pool).await {
            Ok(tasks) => {
                let found = annotate_and_sort(tasks, ctx.location);
                results_outcome(found)
            }
            Err(err) => ToolOutcome::error(err.to_string()),
        },
        "highlight_task" => {
            let Some(task_id) = args.get("task_id").and_then(Value::as_i64) else {
                return ToolOutcome::error("Missing required argument: task_id");
            };
            match available_task::get(ctx.pool, task_id).await {
                Ok(Some(task)) => {
                    let found = FoundTask::from_available(task, ctx.location);
                    let content = json!({ "found": true, "task": found });
                    ToolOutcome {
                        content: content.to_string(),
                        results: None,
                        highlight: Some(task_id),
                    }
                }
                Ok(None) => {
                    let content = json!({
                        "found": false,
                        "message": format!("No task with id {} on the map.", task_id)
                    });
                    ToolOutcome::text(content.to_string())
                }
                Err(err) => ToolOutcome::error(err.to_string()),
            }
        }
        "get_task_stats" => match task::stats(ctx.pool).await {
            Ok(stats) => {
                let content = json!({
                    "total_tasks": stats.total_tasks,
                    "average_reward": stats.average_reward,
                    "by_status": stats.by_status,
                });
                ToolOutcome::text(content.to_string())
            }
            Err(err) => ToolOutcome::error(err.to_string()),
        },
        "suggest_price" => {
            let Some(task_type) = string_arg(&args, "task_type") else {
                return ToolOutcome::error("Missing required argument: task_type");
            };
            ToolOutcome::text(suggest_price(&task_type).to_string())
        }
        other => {
            warn!("Unknown tool requested: {}", other);
            ToolOutcome::error(format!("Unknown tool: {}", other))
        }
    }
}

fn string_arg(args: &HashMap<String, Value>, key: &str) -> Option<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty())
}

fn results_outcome(found: Vec<FoundTask>) -> ToolOutcome {
    let content = json!({ "results": &found });
    ToolOutcome::with_results(content.to_string(), found)
}

/// Static price guide keyed by task-type substring, with a generic fallback
/// range when no entry matches.
const PRICE_GUIDE: &[(&str, i64, i64, i64)] = &[
    ("moving", 30, 60, 50),
    ("grocery", 15, 30, 25),
    ("dog walking", 15, 25, 20),
    ("furniture", 30, 50, 40),
    ("yard work", 25, 45, 35),
    ("tech support", 20, 40, 30),
    ("cat sitting", 30, 50, 45),
    ("car wash", 15, 30, 20),
    ("tutoring", 25, 50, 40),
    ("heavy lifting", 10, 25, 15),
];

fn suggest_price(task_type: &str) -> Value {
    let task_type = task_type.to_lowercase();

    for (key, min, max, typical) in PRICE_GUIDE {
        if task_type.contains(key) {
            return json!({
                "task_type": task_type,
                "min": min,
                "max": max,
                "typical": typical,
                "note": format!("Based on platform averages for {} tasks", key)
            });
        }
    }

    json!({
        "task_type": task_type,
        "min": 15,
        "max": 50,
        "typical": 30,
        "note": "General estimate - price varies by complexity and location"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::Database;

    async fn seeded_pool() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let tasks = vec![
            AvailableTask {
                map_id: 1,
                title: "Dog Walking".to_string(),
                description: "Walk my golden retriever for 30 mins.".to_string(),
                reward: 20,
                lat: 40.700,
                lng: -74.000,
            },
            AvailableTask {
                map_id: 2,
                title: "Grocery Run".to_string(),
                description: "Pick up groceries from Whole Foods.".to_string(),
                reward: 25,
                lat: 40.705,
                lng: -74.000,
            },
            AvailableTask {
                map_id: 3,
                title: "Yard Work".to_string(),
                description: "Rake leaves in the backyard.".to_string(),
                reward: 35,
                lat: 40.750,
                lng: -74.000,
            },
        ];
        available_task::replace_all(db.pool(), &tasks).await.unwrap();
        db
    }

    fn parsed(outcome: &ToolOutcome) -> Value {
        serde_json::from_str(&outcome.content).unwrap()
    }

    #[test]
    fn test_definitions_cover_the_fixed_toolset() {
        let names: Vec<String> = definitions()
            .into_iter()
            .map(|d| d.function.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "search_available_tasks",
                "search_nearby_tasks",
                "list_all_tasks",
                "highlight_task",
                "get_task_stats",
                "suggest_price",
            ]
        );
    }

    #[tokio::test]
    async fn test_search_matches_title_and_description() {
        let db = seeded_pool().await;
        let ctx = ToolContext {
            pool: db.pool(),
            location: None,
        };

        let outcome = execute(&ctx, "search_available_tasks", r#"{"keyword": "DOG"}"#).await;
        let results = outcome.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 1);
        assert!(results[0].distance_km.is_none());

        let outcome = execute(&ctx, "search_available_tasks", r#"{"keyword": "groceries"}"#).await;
        assert_eq!(outcome.results.unwrap()[0].id, 2);
    }

    #[tokio::test]
    async fn test_list_all_sorted_by_distance_when_located() {
        let db = seeded_pool().await;
        let ctx = ToolContext {
            pool: db.pool(),
            location: Some((40.706, -74.000)),
        };

        let outcome = execute(&ctx, "list_all_tasks", "{}").await;
        let results = outcome.results.unwrap();
        let ids: Vec<i64> = results.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert!(results.iter().all(|t| t.distance_km.is_some()));
    }

    #[tokio::test]
    async fn test_nearby_respects_radius() {
        let db = seeded_pool().await;
        let ctx = ToolContext {
            pool: db.pool(),
            location: Some((40.700, -74.000)),
        };

        // Task 2 is ~0.56 km away, task 3 ~5.6 km. Radius 1 keeps 1 and 2.
        let outcome = execute(&ctx, "search_nearby_tasks", r#"{"radius_km": 1}"#).await;
        let results = outcome.results.unwrap();
        let ids: Vec<i64> = results.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(results
            .iter()
            .all(|t| t.distance_km.expect("annotated") <= 1.0));

        // Default 2 km radius gives the same set here.
        let outcome = execute(&ctx, "search_nearby_tasks", "{}").await;
        assert_eq!(outcome.results.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_nearby_soft_fails_without_location() {
        let db = seeded_pool().await;
        let ctx = ToolContext {
            pool: db.pool(),
            location: None,
        };

        let outcome = execute(&ctx, "search_nearby_tasks", "{}").await;
        assert_eq!(outcome.results, Some(Vec::new()));

        let content = parsed(&outcome);
        assert!(content["message"].as_str().unwrap().contains("location"));
    }

    #[tokio::test]
    async fn test_highlight_found_and_not_found() {
        let db = seeded_pool().await;
        let ctx = ToolContext {
            pool: db.pool(),
            location: None,
        };

        let outcome = execute(&ctx, "highlight_task", r#"{"task_id": 2}"#).await;
        assert_eq!(outcome.highlight, Some(2));
        assert_eq!(parsed(&outcome)["found"], true);

        let outcome = execute(&ctx, "highlight_task", r#"{"task_id": 99}"#).await;
        assert_eq!(outcome.highlight, None);
        assert_eq!(parsed(&outcome)["found"], false);
    }

    #[tokio::test]
    async fn test_suggest_price_table_and_fallback() {
        let db = seeded_pool().await;
        let ctx = ToolContext {
            pool: db.pool(),
            location: None,
        };

        let outcome = execute(&ctx, "suggest_price", r#"{"task_type": "Dog Walking"}"#).await;
        let content = parsed(&outcome);
        assert_eq!(content["typical"], 20);
        assert_eq!(content["min"], 15);
        assert_eq!(content["max"], 25);

        let outcome = execute(&ctx, "suggest_price", r#"{"task_type": "skydiving lessons"}"#).await;
        let content = parsed(&outcome);
        assert_eq!(content["typical"], 30);
        assert!(content["note"].as_str().unwrap().contains("General"));
    }

    #[tokio::test]
    async fn test_task_stats_over_accepted_tasks() {
        let db = seeded_pool().await;
        let pool = db.pool();
        let ctx = ToolContext {
            pool,
            location: None,
        };

        let outcome = execute(&ctx, "get_task_stats", "{}").await;
        let content = parsed(&outcome);
        assert_eq!(content["total_tasks"], 0);
        assert_eq!(content["average_reward"], 0.0);

        for (original_id, reward) in [(1, 50), (2, 20)] {
            database::task::accept_task(
                pool,
                &database::NewTask {
                    title: format!("Task {}", original_id),
                    description: String::new(),
                    reward,
                    lat: 40.7,
                    lng: -74.0,
                    original_id: Some(original_id),
                },
            )
            .await
            .unwrap();
        }

        let outcome = execute(&ctx, "get_task_stats", "{}").await;
        let content = parsed(&outcome);
        assert_eq!(content["total_tasks"], 2);
        assert_eq!(content["average_reward"], 35.0);
        assert_eq!(content["by_status"]["accepted"], 2);
        assert!(outcome.results.is_none());
    }

    fn found(id: i64) -> FoundTask {
        FoundTask {
            id,
            title: format!("Task {}", id),
            description: String::new(),
            reward: 10,
            lat: 40.7,
            lng: -74.0,
            distance_km: None,
        }
    }

    #[test]
    fn test_fold_last_results_bearing_tool_wins() {
        let mut fold = OutcomeFold::default();

        fold.absorb(&ToolOutcome::with_results(
            "{}".to_string(),
            vec![found(1), found(2)],
        ));
        assert_eq!(fold.found_tasks.len(), 2);

        // A tool without a results payload leaves the fold alone.
        fold.absorb(&ToolOutcome::text("price advice"));
        assert_eq!(fold.found_tasks.len(), 2);

        fold.absorb(&ToolOutcome::with_results("{}".to_string(), vec![found(3)]));
        let ids: Vec<i64> = fold.found_tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);

        // An empty result set still wins over an earlier non-empty one.
        fold.absorb(&ToolOutcome::with_results("{}".to_string(), Vec::new()));
        assert!(fold.found_tasks.is_empty());
    }

    #[test]
    fn test_fold_keeps_last_successful_highlight() {
        let highlighted = |id| ToolOutcome {
            content: "{}".to_string(),
            results: None,
            highlight: Some(id),
        };

        let mut fold = OutcomeFold::default();
        assert_eq!(fold.highlight_task_id, None);

        fold.absorb(&highlighted(4));
        assert_eq!(fold.highlight_task_id, Some(4));

        // A failed highlight does not clear the earlier success.
        fold.absorb(&ToolOutcome::text("not found"));
        assert_eq!(fold.highlight_task_id, Some(4));

        fold.absorb(&highlighted(7));
        assert_eq!(fold.highlight_task_id, Some(7));
    }

    #[tokio::test]
    async fn test_unknown_tool_and_missing_args() {
        let db = seeded_pool().await;
        let ctx = ToolContext {
            pool: db.pool(),
            location: None,
        };

        let outcome = execute(&ctx, "delete_everything", "{}").await;
        assert!(outcome.content.starts_with("Error: Unknown tool"));

        let outcome = execute(&ctx, "search_available_tasks", "{}").await;
        assert!(outcome.content.contains("keyword"));
    }
}
