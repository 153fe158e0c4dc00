//! Errors for operations invoked in the wrong race state.
//! State is never modified when one of these is returned.

use thiserror::Error;

use crate::race_server::store::RaceStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaceError {
    #[error("cannot generate horses while race is {status}")]
    HorsesLocked { status: RaceStatus },

    #[error("cannot generate schedule: {horses} horses ready, race is {status}")]
    ScheduleNotReady { horses: usize, status: RaceStatus },

    #[error("cannot start race: race is {status} with {rounds} rounds scheduled")]
    StartNotReady { status: RaceStatus, rounds: usize },
}

pub type Result<T> = std::result::Result<T, RaceError>;
