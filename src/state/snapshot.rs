//! Published session snapshot types

use std::time::Duration;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Phase of the idle-tracking state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Activity observed recently, countdown running
    Active,
    /// Warning fired, countdown still running
    Warned,
    /// Countdown reached zero with no activity
    Idle,
}

/// Point-in-time view of the tracker, published on every state change and
/// once per second while the countdown is running
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub enabled: bool,
    /// True while the countdown is running (enabled and not idle)
    pub counting: bool,
    /// Time left until the idle transition, as of `taken_at`
    pub remaining: Duration,
    pub taken_at: Instant,
}

impl SessionSnapshot {
    /// Check if the session is idle
    pub fn is_idle(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    /// Remaining time adjusted for the time elapsed since the snapshot was
    /// taken, floored at zero
    pub fn remaining_now(&self) -> Duration {
        if self.counting {
            self.remaining.saturating_sub(self.taken_at.elapsed())
        } else {
            self.remaining
        }
    }
}
