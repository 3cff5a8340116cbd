//! Deferred actions on the simulation's virtual clock
//!
//! The frame loop never blocks. Timed pauses (level transition, end-of-game
//! reveal) are queued here with a due time and drained by `tick` once the
//! virtual clock passes it. Each action re-checks the game phase when it
//! fires, so a stale action after a rapid restart does nothing.

use serde::{Deserialize, Serialize};

/// Terminal outcome of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    GameOver,
    Victory,
}

/// An action waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Deferred {
    /// End the transition window and resume play at the current level
    ResumeLevel,
    /// Show the final-score screen for a finished session
    RevealOutcome(Outcome),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    due_ms: f64,
    action: Deferred,
}

/// Pending deferred actions, fired in due-time order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    timers: Vec<Timer>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire at `due_ms` on the virtual clock
    pub fn schedule(&mut self, due_ms: f64, action: Deferred) {
        // Stable insert keeps same-time actions in scheduling order
        let index = self.timers.partition_point(|t| t.due_ms <= due_ms);
        self.timers.insert(index, Timer { due_ms, action });
    }

    /// Remove and return every action due at or before `now_ms`
    pub fn take_due(&mut self, now_ms: f64) -> Vec<Deferred> {
        let split = self.timers.partition_point(|t| t.due_ms <= now_ms);
        self.timers.drain(..split).map(|t| t.action).collect()
    }

    /// Drop everything (new session)
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Due time of the next action, if any
    pub fn next_due(&self) -> Option<f64> {
        self.timers.first().map(|t| t.due_ms)
    }
}
