//! User profile operations.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::User;

/// Profile fields a client is allowed to update.
const UPDATABLE_FIELDS: &[&str] = &["username", "bio", "role", "expertise"];

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, bio, role, expertise, joined_date
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// The single demo user.
pub async fn get_demo_user(pool: &SqlitePool) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, bio, role, expertise, joined_date
        FROM users
        ORDER BY id
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: "demo".to_string(),
    })
}

/// Seed the demo user if the users table is empty. Returns the user.
pub async fn seed_demo_user(pool: &SqlitePool) -> Result<User> {
    if let Ok(user) = get_demo_user(pool).await {
        return Ok(user);
    }

    sqlx::query(
        r#"
        INSERT INTO users (username, bio, role, expertise)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind("demo_user")
    .bind("Just here to get things done.")
    .bind("Requester")
    .bind("Moving, errands")
    .execute(pool)
    .await?;

    tracing::info!("Seeded demo user");
    get_demo_user(pool).await
}

/// Update a single whitelisted profile field.
pub async fn update_field(pool: &SqlitePool, id: i64, field: &str, value: &str) -> Result<()> {
    if !UPDATABLE_FIELDS.contains(&field) {
        return Err(DatabaseError::InvalidField(field.to_string()));
    }

    // Field name is whitelisted above, so interpolation is safe.
    let query = format!("UPDATE users SET {} = ? WHERE id = ?", field);
    let result = sqlx::query(&query)
        .bind(value)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    Ok(())
}
