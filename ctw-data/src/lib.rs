//! Data processing for the city CO₂ twin.
//!
//! This crate turns sensor readings and demo fixtures into the shapes the
//! dashboard renders: demo time series, zone summaries, alerts, city stat
//! cards, intervention simulations and JSON exports.

pub mod alerts;
pub mod dashboard;
pub mod demo;
pub mod detail;
pub mod export;
pub mod reports;
pub mod simulation;
pub mod source;
pub mod zones;

/// Direction of a change shown next to a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Seeded RNG for reproducible demo series.
pub fn seeded_rng(seed: u64) -> rand_chacha::ChaCha8Rng {
    use rand::SeedableRng;
    rand_chacha::ChaCha8Rng::seed_from_u64(seed)
}
