//! Round - Scheduled races and schedule building

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::race_server::config::{HORSES_PER_ROUND, ROUND_DISTANCES};
use crate::race_server::horse::Horse;

/// One scheduled race over a subset of the pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Sequential id, starting at 1
    pub id: u32,
    /// Distance in meters
    pub distance: u32,
    pub horses: Vec<Horse>,
}

/// Build one round per configured distance.
///
/// Each round samples `HORSES_PER_ROUND` distinct horses from the pool
/// independently, so a horse may run in several rounds. A pool smaller
/// than a round yields rounds with the whole (shuffled) pool.
pub fn build_schedule<R: Rng + ?Sized>(pool: &[Horse], rng: &mut R) -> Vec<Round> {
    ROUND_DISTANCES
        .iter()
        .enumerate()
        .map(|(i, &distance)| {
            let mut horses = pool.to_vec();
            horses.shuffle(rng);
            horses.truncate(HORSES_PER_ROUND);
            Round {
                id: i as u32 + 1,
                distance,
                horses,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race_server::config::TOTAL_ROUNDS;
    use crate::race_server::horse::generate_horses_with;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn one_round_per_distance() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = generate_horses_with(&mut rng);
        let schedule = build_schedule(&pool, &mut rng);

        assert_eq!(schedule.len(), TOTAL_ROUNDS);
        let distances: Vec<u32> = schedule.iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![1200, 1400, 1600, 1800, 2000, 2200]);
        let ids: Vec<u32> = schedule.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn rounds_draw_distinct_horses_from_pool() {
        let mut rng = StdRng::seed_from_u64(11);
        let pool = generate_horses_with(&mut rng);
        for round in build_schedule(&pool, &mut rng) {
            assert_eq!(round.horses.len(), HORSES_PER_ROUND);
            let ids: HashSet<u32> = round.horses.iter().map(|h| h.id).collect();
            assert_eq!(ids.len(), HORSES_PER_ROUND);
            assert!(round.horses.iter().all(|h| pool.contains(h)));
        }
    }

    #[test]
    fn rounds_are_sampled_independently() {
        let mut rng = StdRng::seed_from_u64(5);
        let pool = generate_horses_with(&mut rng);
        let schedule = build_schedule(&pool, &mut rng);
        let lineups: HashSet<Vec<u32>> = schedule
            .iter()
            .map(|r| r.horses.iter().map(|h| h.id).collect())
            .collect();
        assert!(lineups.len() > 1);
    }
}
