//! Scoring - Round outcome computation
//!
//! Performance couples condition and distance with a per-run random factor:
//! `condition * U[0, 1) * distance`. Standings are sorted by performance,
//! best first, keeping input order between equal scores.

use rand::Rng;

use crate::race_server::horse::{Horse, RankedHorse};

/// Score a round using the thread-local RNG
pub fn score_round(horses: &[Horse], distance: u32) -> Vec<RankedHorse> {
    score_round_with(horses, distance, &mut rand::thread_rng())
}

/// Score a round, drawing the random factor for each horse from `rng`
pub fn score_round_with<R: Rng + ?Sized>(
    horses: &[Horse],
    distance: u32,
    rng: &mut R,
) -> Vec<RankedHorse> {
    let mut standings: Vec<RankedHorse> = horses
        .iter()
        .map(|horse| RankedHorse {
            horse: horse.clone(),
            performance: performance(horse.condition, rng.gen::<f64>(), distance),
        })
        .collect();

    // `sort_by` is stable, ties keep their input order
    standings.sort_by(|a, b| b.performance.total_cmp(&a.performance));
    standings
}

fn performance(condition: u32, luck: f64, distance: u32) -> f64 {
    f64::from(condition) * luck * f64::from(distance)
}
