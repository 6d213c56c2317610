//! Fruit spawning and the difficulty curve

use rand::Rng;

use super::state::{FallingObject, FruitKind};
use crate::consts::*;

/// Create a fruit at the top of the field with a random column and kind.
///
/// No overlap check: new fruit may stack on existing fruit or the player.
pub fn spawn_fruit<R: Rng + ?Sized>(rng: &mut R) -> FallingObject {
    let x = rng.random_range(0.0..SPAWN_X_MAX);
    let kind = FruitKind::ALL[rng.random_range(0..FruitKind::ALL.len())];
    FallingObject::new(kind, x)
}

/// Number of escalation thresholds (positive multiples of ESCALATION_STEP)
/// crossed when the score moves from `prev` to `new`.
pub fn thresholds_crossed(prev: u64, new: u64) -> u64 {
    if new <= prev {
        return 0;
    }
    new / ESCALATION_STEP - prev / ESCALATION_STEP
}

/// Shrink a spawn interval once, respecting the floor
pub fn shrink_interval(interval_ms: f64, floor_ms: f64) -> f64 {
    (interval_ms * SPAWN_SHRINK).max(floor_ms)
}

/// Spawn interval after `crossings` escalations
pub fn escalate(mut interval_ms: f64, floor_ms: f64, crossings: u64) -> f64 {
    for _ in 0..crossings {
        interval_ms = shrink_interval(interval_ms, floor_ms);
    }
    interval_ms
}
