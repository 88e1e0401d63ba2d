//! Nearby synthetic tasks for the map.

use std::collections::HashSet;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use task_gen::MapTask;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Raw query parameters; validated by hand so malformed coordinates get a
/// JSON 400 instead of a framework rejection.
#[derive(Deserialize)]
pub struct NearbyQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

/// Response payload.
#[derive(Serialize)]
pub struct NearbyResponse {
    pub tasks: Vec<MapTask>,
}

/// Generate the deterministic synthetic tasks around a point, excluding any
/// the user already accepted.
pub async fn nearby(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<NearbyResponse>> {
    let (lat, lng) = parse_coordinates(&query)?;

    let excluded: HashSet<i64> = database::task::accepted_original_ids(state.db.pool())
        .await?
        .into_iter()
        .collect();

    let tasks = task_gen::generate(lat, lng, &excluded);

    Ok(Json(NearbyResponse { tasks }))
}

fn parse_coordinates(query: &NearbyQuery) -> Result<(f64, f64)> {
    let lat = query.lat.as_deref().and_then(|v| v.parse::<f64>().ok());
    let lng = query.lng.as_deref().and_then(|v| v.parse::<f64>().ok());

    match (lat, lng) {
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Ok((lat, lng)),
        _ => Err(ApiError::BadRequest("Invalid coordinates".to_string())),
    }
}
