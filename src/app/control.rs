use std::time::{Duration, Instant};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    /// Nothing has been played yet
    Idle,
    Running,
    GameOver,
    /// The snake filled the whole board
    Won,
}

/// Schedules the simulation ticks of a running game
///
/// There is at most one pending tick at any time, scheduling
/// a new one replaces whatever was pending before.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    pending: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self { interval, pending: None }
    }

    /// When the pending tick is due, if there is one
    pub fn pending(&self) -> Option<Instant> {
        self.pending
    }

    pub fn schedule(&mut self, now: Instant) {
        self.pending = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Consumes the pending tick if it is due at `now`
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(due) if now >= due => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
