//! Deterministic synthetic task generation for the Find a Helper map.
//!
//! This crate produces the dummy tasks that populate the map UI. Output is
//! reproducible: two requests from the same coordinate bucket (coordinates
//! rounded to two decimals) yield byte-identical task lists across calls and
//! across server restarts.

pub mod catalog;
pub mod generator;
pub mod geo;

pub use catalog::{TaskTemplate, TEMPLATES};
pub use generator::{bucket_seed, generate, MapTask, JITTER_DEGREES, MAX_TASKS};
pub use geo::distance_km;
