//! Deterministic nearby-task generation.
//!
//! Tasks are placed with a pseudo-random generator seeded from the request
//! coordinates rounded to two decimal places, so every request within the
//! same ~1 km bucket sees the same task layout. The RNG call order is fixed:
//! one shuffle of the catalog, then exactly two uniform draws per emitted
//! position (latitude jitter, then longitude jitter). Excluded positions
//! still consume their draws so the remaining tasks keep their placement.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::TEMPLATES;

/// Maximum number of tasks emitted per request.
pub const MAX_TASKS: usize = 60;

/// Uniform jitter applied to each coordinate, in degrees (~2 km scatter
/// at mid latitudes, no geodesic correction).
pub const JITTER_DEGREES: f64 = 0.02;

/// A synthetic task for map display. Not persisted; regenerated per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTask {
    /// 1-based position in the shuffled catalog for this bucket.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Reward in whole dollars.
    pub reward: i64,
    /// Task description.
    pub description: String,
    /// Jittered latitude.
    pub lat: f64,
    /// Jittered longitude.
    pub lng: f64,
    /// Marker kind, always "task".
    #[serde(rename = "type")]
    pub kind: String,
}

/// Derive the generator seed from coordinates rounded to two decimal places.
///
/// Two coordinate pairs that round to the same values share a seed and
/// therefore the same permutation and jitter sequence.
pub fn bucket_seed(lat: f64, lng: f64) -> u64 {
    // round(lat, 2) * 10000 == round(lat * 100) * 100
    let lat_part = (lat * 100.0).round() * 100.0;
    let lng_part = (lng * 100.0).round() * 100.0;
    (lat_part + lng_part) as i64 as u64
}

/// Generate the synthetic tasks around a point, skipping excluded ids.
///
/// Ids are dense 1-based positions over the shuffled catalog; an id in
/// `excluded_ids` is omitted without shifting the ids or positions of the
/// other tasks. Pure with respect to its inputs.
pub fn generate(lat: f64, lng: f64, excluded_ids: &HashSet<i64>) -> Vec<MapTask> {
    let mut rng = StdRng::seed_from_u64(bucket_seed(lat, lng));

    let mut order: Vec<usize> = (0..TEMPLATES.len()).collect();
    order.shuffle(&mut rng);

    let count = TEMPLATES.len().min(MAX_TASKS);
    let mut tasks = Vec::with_capacity(count);

    for (position, &template_index) in order.iter().take(count).enumerate() {
        // Draw both offsets before the exclusion check; skipped positions
        // must consume their draws to keep the sequence stable.
        let offset_lat = rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES);
        let offset_lng = rng.gen_range(-JITTER_DEGREES..=JITTER_DEGREES);

        let id = (position + 1) as i64;
        if excluded_ids.contains(&id) {
            continue;
        }

        let template = &TEMPLATES[template_index];
        tasks.push(MapTask {
            id,
            title: template.title.to_string(),
            reward: template.reward,
            description: template.description.to_string(),
            lat: lat + offset_lat,
            lng: lng + offset_lng,
            kind: "task".to_string(),
        });
    }

    tasks
}
