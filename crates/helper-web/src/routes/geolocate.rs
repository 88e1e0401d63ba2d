//! Server-side geolocation proxy.
//!
//! The browser client falls back to this when geolocation permission is
//! denied; proxying keeps the lookup service off the client entirely.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ApiError, Result};
use crate::state::AppState;

const GEOLOCATE_URL: &str = "http://ip-api.com/json";

#[derive(Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    country: Option<String>,
}

/// Approximate location of the caller.
#[derive(Serialize)]
pub struct GeolocateResponse {
    pub lat: f64,
    pub lng: f64,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Look up an approximate location from the server's IP.
pub async fn geolocate(State(state): State<AppState>) -> Result<Json<GeolocateResponse>> {
    let response = state
        .http
        .get(GEOLOCATE_URL)
        .send()
        .await
        .map_err(|e| upstream(&e.to_string()))?;

    let body: IpApiResponse = response
        .json()
        .await
        .map_err(|e| upstream(&e.to_string()))?;

    if body.status != "success" {
        return Err(upstream("lookup did not succeed"));
    }

    match (body.lat, body.lon) {
        (Some(lat), Some(lng)) => Ok(Json(GeolocateResponse {
            lat,
            lng,
            city: body.city,
            country: body.country,
        })),
        _ => Err(upstream("response missing coordinates")),
    }
}

fn upstream(detail: &str) -> ApiError {
    warn!(detail, "Geolocation lookup failed");
    ApiError::Upstream(format!("Geolocation lookup failed: {}", detail))
}
