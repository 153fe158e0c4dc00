//! Controller - Race workflow and round sequencing
//!
//! Gates every transition, builds the schedule and drives rounds one at a
//! time through the store. Time is advanced by the host calling `tick`,
//! so nothing here ever blocks.

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::race_server::config::{RaceConfig, TOTAL_HORSES, TOTAL_ROUNDS};
use crate::race_server::error::{RaceError, Result};
use crate::race_server::horse::{generate_horses_with, RankedHorse};
use crate::race_server::round::build_schedule;
use crate::race_server::scoring::score_round_with;
use crate::race_server::store::{RaceSnapshot, RaceStatus, RaceStore, RoundResults};
use crate::race_server::timer::{Fired, RoundTimer};

/// Standings waiting for their round's run time to elapse
#[derive(Debug, Clone)]
struct PendingRound {
    round_id: u32,
    standings: Vec<RankedHorse>,
}

/// Owns the race state and sequences rounds
pub struct RaceController {
    /// Canonical race state
    store: RaceStore,
    /// Commit step for the round in progress
    timer: RoundTimer<PendingRound>,
    /// Source for conditions, lineups and luck
    rng: StdRng,
    config: RaceConfig,
}

impl RaceController {
    /// Create a controller seeded from OS entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a controller with reproducible randomness
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            store: RaceStore::new(),
            timer: RoundTimer::new(),
            rng,
            config: RaceConfig::default(),
        }
    }

    pub fn store(&self) -> &RaceStore {
        &self.store
    }

    /// Raw store access. Mutations made here bypass the controller's guards.
    pub fn store_mut(&mut self) -> &mut RaceStore {
        &mut self.store
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn can_generate_schedule(&self) -> bool {
        self.store.horses().len() == TOTAL_HORSES
            && matches!(
                self.store.status(),
                RaceStatus::Idle | RaceStatus::Finished
            )
    }

    pub fn can_start_race(&self) -> bool {
        self.store.status() == RaceStatus::Generated
            && self.store.schedule().len() == TOTAL_ROUNDS
    }

    /// Populate a fresh horse pool. Only allowed while idle.
    pub fn generate_horses(&mut self) -> Result<()> {
        let status = self.store.status();
        if status != RaceStatus::Idle {
            warn!("Cannot generate horses: race is {}", status);
            return Err(RaceError::HorsesLocked { status });
        }

        let horses = generate_horses_with(&mut self.rng);
        self.store.set_horses(horses);
        self.store.set_status(RaceStatus::Idle);
        info!("Generated {} horses", TOTAL_HORSES);
        Ok(())
    }

    /// Draw a new schedule from the pool and rewind round progress
    pub fn generate_schedule(&mut self) -> Result<()> {
        if !self.can_generate_schedule() {
            let horses = self.store.horses().len();
            let status = self.store.status();
            warn!(
                "Cannot generate schedule: {} horses ready, race is {}",
                horses, status
            );
            return Err(RaceError::ScheduleNotReady { horses, status });
        }

        if self.timer.cancel() {
            debug!("Cancelled pending round timer");
        }

        // Build from the pool before committing anything
        let schedule = build_schedule(self.store.horses(), &mut self.rng);
        self.store.reset_round_progress();
        self.store.set_schedule(schedule);
        self.store.set_status(RaceStatus::Generated);
        info!("Generated schedule with {} rounds", TOTAL_ROUNDS);
        Ok(())
    }

    /// Start sequencing rounds now
    pub fn start_race(&mut self) -> Result<()> {
        self.start_race_at(Instant::now())
    }

    /// Start sequencing rounds, treating `now` as the current time
    pub fn start_race_at(&mut self, now: Instant) -> Result<()> {
        if !self.can_start_race() {
            let status = self.store.status();
            let rounds = self.store.schedule().len();
            warn!(
                "Cannot start race: race is {} with {} rounds scheduled",
                status, rounds
            );
            return Err(RaceError::StartNotReady { status, rounds });
        }

        self.store.set_status(RaceStatus::Running);
        info!("Race started");
        self.run_next_round(now);
        Ok(())
    }

    /// Discard everything, including any pending round
    pub fn reset_race(&mut self) {
        if self.timer.cancel() {
            debug!("Cancelled pending round timer");
        }
        self.store.full_reset();
        info!("Race reset");
    }

    /// Advance sequencing to the current time
    pub fn tick(&mut self) -> RaceSnapshot {
        self.tick_at(Instant::now())
    }

    /// Advance sequencing to `now` and return the resulting state
    pub fn tick_at(&mut self, now: Instant) -> RaceSnapshot {
        // `between_rounds` is shown for exactly one tick
        if self.store.status() == RaceStatus::BetweenRounds {
            self.store.set_status(RaceStatus::Running);
        }

        if let Some(fired) = self.timer.poll(now) {
            self.complete_round(fired, now);
        }

        self.snapshot_at(now)
    }

    /// Score the round at the pointer and arm its commit, or finish
    fn run_next_round(&mut self, now: Instant) {
        let Some(round) = self.store.current_round() else {
            self.store.set_status(RaceStatus::Finished);
            info!("Race finished");
            return;
        };

        let round_id = round.id;
        let distance = round.distance;
        let standings = score_round_with(&round.horses, distance, &mut self.rng);

        let epoch = self.timer.schedule(
            now,
            self.config.round_duration(),
            PendingRound {
                round_id,
                standings,
            },
        );
        debug!(
            "Round {} ({}m) armed, epoch {}",
            round_id, distance, epoch
        );
    }

    fn complete_round(&mut self, fired: Fired<PendingRound>, now: Instant) {
        if !self.timer.is_current(fired.epoch) || !self.store.status().is_active() {
            debug!(
                "Discarding stale round {} (epoch {}, race is {})",
                fired.payload.round_id,
                fired.epoch,
                self.store.status()
            );
            return;
        }

        let PendingRound {
            round_id,
            standings,
        } = fired.payload;
        self.store.record_round_result(round_id, standings);
        self.store.advance_round();
        info!("Round {} completed", round_id);

        if self.store.is_race_finished() {
            self.store.set_status(RaceStatus::Finished);
            info!("Race finished");
        } else {
            self.store.set_status(RaceStatus::BetweenRounds);
            self.run_next_round(now);
        }
    }

    /// Current state without advancing
    pub fn get_snapshot(&self) -> RaceSnapshot {
        self.snapshot_at(Instant::now())
    }

    pub fn snapshot_at(&self, now: Instant) -> RaceSnapshot {
        let mut snapshot = self.store.snapshot();
        snapshot.round_remaining_ms = self
            .timer
            .remaining(now)
            .map(|d| d.as_millis() as u64);
        snapshot
    }

    pub fn get_results(&self) -> &RoundResults {
        self.store.results()
    }

    /// Whether a round commit is waiting on its timer
    pub fn is_round_pending(&self) -> bool {
        self.timer.is_pending()
    }
}

impl Default for RaceController {
    fn default() -> Self {
        Self::new()
    }
}
