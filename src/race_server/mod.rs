//! Race Server Module
//!
//! Horse pool generation, round scoring and the multi-round race state
//! machine. Presentation layers read snapshots and invoke operations on
//! `RaceController`.

pub mod config;
pub mod controller;
pub mod error;
pub mod horse;
pub mod round;
pub mod scoring;
pub mod store;
pub mod timer;

pub use config::RaceConfig;
pub use controller::RaceController;
pub use error::RaceError;
pub use horse::{Horse, RankedHorse};
pub use round::Round;
pub use store::{RaceSnapshot, RaceStatus, RaceStore, RoundResults};
