//! SQLite persistence layer for Find a Helper.
//!
//! This crate provides async database operations for accepted tasks, the
//! available-tasks snapshot, users, and message logs using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{task, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:helper.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let accepted = task::list_tasks(db.pool()).await?;
//!     println!("{} accepted tasks", accepted.len());
//!
//!     Ok(())
//! }
//! ```

pub mod available_task;
pub mod chat_message;
pub mod direct_message;
pub mod error;
pub mod models;
pub mod task;
pub mod user;

pub use error::{DatabaseError, Result};
pub use models::{AvailableTask, ChatMessage, DirectMessage, Task, User};
pub use task::{NewTask, TaskStats};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for an in-memory database in tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn map_task(original_id: i64) -> NewTask {
        NewTask {
            title: "Move Couch".to_string(),
            description: "Need help moving a couch.".to_string(),
            reward: 50,
            lat: 40.71,
            lng: -74.01,
            original_id: Some(original_id),
        }
    }

    #[tokio::test]
    async fn test_accept_task_is_idempotent() {
        let db = test_db().await;
        let pool = db.pool();

        let first = task::accept_task(pool, &map_task(7)).await.unwrap();
        let second = task::accept_task(pool, &map_task(7)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(first.original_id, Some(7));
        assert_eq!(first.status, "accepted");

        let all = task::list_tasks(pool).await.unwrap();
        assert_eq!(all.len(), 1);

        let ids = task::accepted_original_ids(pool).await.unwrap();
        assert_eq!(ids, vec![7]);
    }

    #[tokio::test]
    async fn test_custom_task_without_original_id() {
        let db = test_db().await;
        let pool = db.pool();

        let custom = NewTask {
            original_id: None,
            ..map_task(0)
        };
        let a = task::accept_task(pool, &custom).await.unwrap();
        let b = task::accept_task(pool, &custom).await.unwrap();

        // No map id means no idempotency key; two rows result.
        assert_ne!(a.id, b.id);
        assert_eq!(task::list_tasks(pool).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_task() {
        let db = test_db().await;
        let pool = db.pool();

        let accepted = task::accept_task(pool, &map_task(3)).await.unwrap();
        task::delete_task(pool, accepted.id).await.unwrap();

        let result = task::delete_task(pool, accepted.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_task_stats() {
        let db = test_db().await;
        let pool = db.pool();

        let empty = task::stats(pool).await.unwrap();
        assert_eq!(empty.total_tasks, 0);
        assert_eq!(empty.average_reward, 0.0);
        assert!(empty.by_status.is_empty());

        task::accept_task(pool, &map_task(1)).await.unwrap();
        let cheap = NewTask {
            reward: 25,
            ..map_task(2)
        };
        task::accept_task(pool, &cheap).await.unwrap();

        let stats = task::stats(pool).await.unwrap();
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.average_reward, 37.5);
        assert_eq!(stats.by_status.get("accepted"), Some(&2));
    }

    #[tokio::test]
    async fn test_snapshot_replaced_wholesale() {
        let db = test_db().await;
        let pool = db.pool();

        let first = vec![AvailableTask {
            map_id: 1,
            title: "Dog Walking".to_string(),
            description: "Walk my golden retriever.".to_string(),
            reward: 20,
            lat: 40.7,
            lng: -74.0,
        }];
        available_task::replace_all(pool, &first).await.unwrap();

        let second = vec![
            AvailableTask {
                map_id: 2,
                title: "Yard Work".to_string(),
                description: "Rake leaves.".to_string(),
                reward: 35,
                lat: 40.71,
                lng: -74.02,
            },
            AvailableTask {
                map_id: 3,
                title: "Car Wash".to_string(),
                description: "Wash my sedan.".to_string(),
                reward: 20,
                lat: 40.69,
                lng: -73.99,
            },
        ];
        available_task::replace_all(pool, &second).await.unwrap();

        let snapshot = available_task::list_all(pool).await.unwrap();
        assert_eq!(snapshot, second);
        assert!(available_task::get(pool, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_snapshot_search_is_case_insensitive() {
        let db = test_db().await;
        let pool = db.pool();

        let tasks = vec![
            AvailableTask {
                map_id: 1,
                title: "Dog Walking".to_string(),
                description: "Walk my golden retriever.".to_string(),
                reward: 20,
                lat: 40.7,
                lng: -74.0,
            },
            AvailableTask {
                map_id: 2,
                title: "Grocery Run".to_string(),
                description: "Pick up groceries.".to_string(),
                reward: 25,
                lat: 40.71,
                lng: -74.01,
            },
        ];
        available_task::replace_all(pool, &tasks).await.unwrap();

        let hits = available_task::search(pool, "dog").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].map_id, 1);

        // Description matches too.
        let hits = available_task::search(pool, "GROCERIES").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].map_id, 2);
    }

    #[tokio::test]
    async fn test_chat_log_window_and_clear() {
        let db = test_db().await;
        let pool = db.pool();

        for i in 0..5 {
            chat_message::append(pool, 1, "user", &format!("question {}", i))
                .await
                .unwrap();
            chat_message::append(pool, 1, "assistant", &format!("answer {}", i))
                .await
                .unwrap();
        }

        let window = chat_message::recent(pool, 1, 6).await.unwrap();
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].content, "question 2");
        assert_eq!(window[5].content, "answer 4");

        chat_message::clear(pool, 1).await.unwrap();
        assert!(chat_message::list_all(pool, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_seed_and_update() {
        let db = test_db().await;
        let pool = db.pool();

        let user = user::seed_demo_user(pool).await.unwrap();
        assert_eq!(user.username, "demo_user");

        // Seeding again is a no-op.
        let again = user::seed_demo_user(pool).await.unwrap();
        assert_eq!(again.id, user.id);

        user::update_field(pool, user.id, "bio", "Happy to help")
            .await
            .unwrap();
        let updated = user::get_user(pool, user.id).await.unwrap();
        assert_eq!(updated.bio.as_deref(), Some("Happy to help"));

        let result = user::update_field(pool, user.id, "joined_date", "2020-01-01").await;
        assert!(matches!(result, Err(DatabaseError::InvalidField(_))));
    }

    #[tokio::test]
    async fn test_direct_messages() {
        let db = test_db().await;
        let pool = db.pool();

        direct_message::append(pool, "demo_user", "sarah_h", "Is the couch still there?")
            .await
            .unwrap();
        direct_message::append(pool, "sarah_h", "demo_user", "Yes, come by anytime!")
            .await
            .unwrap();

        let all = direct_message::list_all(pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].sender, "demo_user");
        assert_eq!(all[1].recipient, "demo_user");
    }
}
