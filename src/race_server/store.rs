//! Store - Canonical race state
//!
//! Holds the pool, schedule, results, round pointer and status. The store
//! only applies mutations; deciding whether a mutation is legal is the
//! controller's job. Derived views are recomputed on every call.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::race_server::horse::{Horse, RankedHorse};
use crate::race_server::round::Round;

/// Coarse race lifecycle phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaceStatus {
    #[default]
    Idle,
    Generated,
    Running,
    BetweenRounds,
    Finished,
}

impl RaceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaceStatus::Idle => "idle",
            RaceStatus::Generated => "generated",
            RaceStatus::Running => "running",
            RaceStatus::BetweenRounds => "between_rounds",
            RaceStatus::Finished => "finished",
        }
    }

    /// Whether rounds are being sequenced
    pub fn is_active(&self) -> bool {
        matches!(self, RaceStatus::Running | RaceStatus::BetweenRounds)
    }
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Standings per round id
pub type RoundResults = BTreeMap<u32, Vec<RankedHorse>>;

/// Single source of truth for a race
#[derive(Debug, Clone, Default)]
pub struct RaceStore {
    horses: Vec<Horse>,
    schedule: Vec<Round>,
    results: RoundResults,
    current_round_index: usize,
    status: RaceStatus,
    /// Bumped on every mutation
    revision: u64,
}

impl RaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations

    pub fn set_horses(&mut self, horses: Vec<Horse>) {
        self.horses = horses;
        self.touch();
    }

    pub fn set_schedule(&mut self, schedule: Vec<Round>) {
        self.schedule = schedule;
        self.touch();
    }

    /// Store standings for a round, replacing any earlier entry for that id
    pub fn record_round_result(&mut self, round_id: u32, standings: Vec<RankedHorse>) {
        self.results.insert(round_id, standings);
        self.touch();
    }

    pub fn set_status(&mut self, status: RaceStatus) {
        self.status = status;
        self.touch();
    }

    /// Move the pointer forward. Not clamped; check `is_race_finished`.
    pub fn advance_round(&mut self) {
        self.current_round_index += 1;
        self.touch();
    }

    /// Rewind the pointer and drop results, keeping pool and schedule
    pub fn reset_round_progress(&mut self) {
        self.current_round_index = 0;
        self.results.clear();
        self.touch();
    }

    /// Return to the initial empty state
    pub fn full_reset(&mut self) {
        self.horses.clear();
        self.schedule.clear();
        self.results.clear();
        self.current_round_index = 0;
        self.status = RaceStatus::Idle;
        self.touch();
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // Reads

    pub fn horses(&self) -> &[Horse] {
        &self.horses
    }

    pub fn schedule(&self) -> &[Round] {
        &self.schedule
    }

    pub fn results(&self) -> &RoundResults {
        &self.results
    }

    pub fn round_result(&self, round_id: u32) -> Option<&[RankedHorse]> {
        self.results.get(&round_id).map(Vec::as_slice)
    }

    pub fn current_round_index(&self) -> usize {
        self.current_round_index
    }

    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // Derived

    /// Round at the pointer, if the pointer is in range
    pub fn current_round(&self) -> Option<&Round> {
        self.schedule.get(self.current_round_index)
    }

    pub fn is_race_finished(&self) -> bool {
        self.current_round_index >= self.schedule.len()
    }

    /// Top finisher of a completed round
    pub fn round_winner(&self, round_id: u32) -> Option<&RankedHorse> {
        self.results.get(&round_id).and_then(|s| s.first())
    }

    /// Owned copy of everything the presentation layer may read
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            status: self.status,
            horses: self.horses.clone(),
            schedule: self.schedule.clone(),
            results: self.results.clone(),
            current_round_index: self.current_round_index,
            current_round: self.current_round().cloned(),
            is_race_finished: self.is_race_finished(),
            round_remaining_ms: None,
            revision: self.revision,
        }
    }
}

/// Race state for IPC transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub status: RaceStatus,
    pub horses: Vec<Horse>,
    pub schedule: Vec<Round>,
    pub results: RoundResults,
    pub current_round_index: usize,
    pub current_round: Option<Round>,
    pub is_race_finished: bool,
    /// Time left before the running round commits, if one is pending
    pub round_remaining_ms: Option<u64>,
    pub revision: u64,
}
