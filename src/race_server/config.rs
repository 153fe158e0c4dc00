//! Config - Fixed race rules
//!
//! The race is played under a single rule set. `RaceConfig` is a read-only
//! view of these constants for the presentation layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Size of the horse pool
pub const TOTAL_HORSES: usize = 20;
/// Horses drawn into each round
pub const HORSES_PER_ROUND: usize = 10;
/// Rounds per race
pub const TOTAL_ROUNDS: usize = 6;
/// Fixed run time of a single round
pub const RACE_DURATION_MS: u64 = 3000;
/// Lowest possible horse condition
pub const MIN_CONDITION: u32 = 1;
/// Highest possible horse condition
pub const MAX_CONDITION: u32 = 100;
/// Distance of each round in meters, one per round, ascending
pub const ROUND_DISTANCES: [u32; TOTAL_ROUNDS] = [1200, 1400, 1600, 1800, 2000, 2200];

/// Hue spacing between consecutive horse colors
pub const COLOR_HUE_STEP: usize = 360 / TOTAL_HORSES;
pub const COLOR_SATURATION: u32 = 70;
pub const COLOR_LIGHTNESS: u32 = 50;

/// Read-only description of the race rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConfig {
    pub total_horses: usize,
    pub horses_per_round: usize,
    pub total_rounds: usize,
    /// Round run time in milliseconds
    pub race_duration_ms: u64,
    pub min_condition: u32,
    pub max_condition: u32,
    /// Round distances in meters
    pub round_distances: Vec<u32>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            total_horses: TOTAL_HORSES,
            horses_per_round: HORSES_PER_ROUND,
            total_rounds: TOTAL_ROUNDS,
            race_duration_ms: RACE_DURATION_MS,
            min_condition: MIN_CONDITION,
            max_condition: MAX_CONDITION,
            round_distances: ROUND_DISTANCES.to_vec(),
        }
    }
}

impl RaceConfig {
    /// Delay between scoring a round and committing its result
    pub fn round_duration(&self) -> Duration {
        Duration::from_millis(self.race_duration_ms)
    }
}
