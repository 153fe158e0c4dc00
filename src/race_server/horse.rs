//! Horse - Competitor records and pool generation
//!
//! A horse is created once per pool and never modified afterwards.
//! Scoring produces `RankedHorse` copies instead of touching the record.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::race_server::config::{
    COLOR_HUE_STEP, COLOR_LIGHTNESS, COLOR_SATURATION, MAX_CONDITION, MIN_CONDITION,
    TOTAL_HORSES,
};

/// A single competitor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Horse {
    /// Unique id, starting at 1
    pub id: u32,
    pub name: String,
    /// Fitness in `[MIN_CONDITION, MAX_CONDITION]`
    pub condition: u32,
    /// Display color, unique within the pool
    pub color: String,
}

impl Horse {
    /// Build the horse at zero-based pool position `index`
    pub fn new(index: usize, condition: u32) -> Self {
        Self {
            id: index as u32 + 1,
            name: format!("Horse {}", index + 1),
            condition,
            color: Self::color_for(index),
        }
    }

    /// Evenly spaced hue per pool position, so colors never collide
    fn color_for(index: usize) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            index * COLOR_HUE_STEP,
            COLOR_SATURATION,
            COLOR_LIGHTNESS
        )
    }
}

/// A horse annotated with its score for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedHorse {
    #[serde(flatten)]
    pub horse: Horse,
    pub performance: f64,
}

/// Generate a full pool using the thread-local RNG
pub fn generate_horses() -> Vec<Horse> {
    generate_horses_with(&mut rand::thread_rng())
}

/// Generate a full pool, drawing conditions from `rng`
pub fn generate_horses_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<Horse> {
    (0..TOTAL_HORSES)
        .map(|i| Horse::new(i, rng.gen_range(MIN_CONDITION..=MAX_CONDITION)))
        .collect()
}
