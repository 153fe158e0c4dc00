//! Timer - Cancellable deferred step
//!
//! The host drives time by polling. At most one step is pending; arming a
//! new one or cancelling bumps the epoch, so any step fired under an older
//! epoch can be recognized as stale.

use std::time::{Duration, Instant};

/// A step that became due
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    /// Epoch the step was armed under
    pub epoch: u64,
    pub payload: T,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due: Instant,
    epoch: u64,
    payload: T,
}

/// Single-slot deferred execution
#[derive(Debug, Clone)]
pub struct RoundTimer<T> {
    pending: Option<Pending<T>>,
    epoch: u64,
}

impl<T> Default for RoundTimer<T> {
    fn default() -> Self {
        Self {
            pending: None,
            epoch: 0,
        }
    }
}

impl<T> RoundTimer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `payload` to fire once `delay` has passed since `now`, replacing
    /// anything already pending. Returns the new epoch.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> u64 {
        self.epoch += 1;
        self.pending = Some(Pending {
            due: now + delay,
            epoch: self.epoch,
            payload,
        });
        self.epoch
    }

    /// Drop the pending step, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.epoch += 1;
        self.pending.take().is_some()
    }

    /// Take the pending step if it is due at `now`
    pub fn poll(&mut self, now: Instant) -> Option<Fired<T>> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| Fired {
                epoch: p.epoch,
                payload: p.payload,
            }),
            _ => None,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a fired step still belongs to the current arming
    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.epoch
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending step is due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }
}
