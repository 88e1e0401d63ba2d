//! Demo user profile routes.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use database::models::User;
use database::user;

use crate::error::Result;
use crate::state::AppState;

/// The demo user's profile.
pub async fn get_user(State(state): State<AppState>) -> Result<Json<User>> {
    let user = user::get_demo_user(state.db.pool()).await?;
    Ok(Json(user))
}

/// Request to update one profile field.
#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub field: String,
    pub value: String,
}

/// Update response.
#[derive(Serialize)]
pub struct UpdateUserResponse {
    pub success: bool,
    pub user: User,
}

/// Update a single whitelisted profile field on the demo user.
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UpdateUserResponse>> {
    let pool = state.db.pool();
    let user = user::get_demo_user(pool).await?;

    user::update_field(pool, user.id, &req.field, &req.value).await?;
    let user = user::get_user(pool, user.id).await?;

    Ok(Json(UpdateUserResponse {
        success: true,
        user,
    }))
}
