//! Idle-tracking state machine
//!
//! Pure single-owner state: every mutation happens through the driver task,
//! with the current instant passed in explicitly. The machine never sleeps
//! or schedules on its own; it only reports the next deadline to arm.

use std::time::Duration;
use tokio::time::Instant;

use crate::state::{SessionPhase, SessionSnapshot};

/// Default warning lead time before the idle transition
pub const DEFAULT_WARNING_LEAD: Duration = Duration::from_secs(5 * 60);

/// Default minimum spacing between processed activity events
pub const DEFAULT_ACTIVITY_THROTTLE: Duration = Duration::from_secs(1);

/// Tracker configuration
///
/// `timeout == 0` is not rejected; it degrades to an idle transition on the
/// first scheduling pass. A `warning_time >= timeout` means the warning is
/// never scheduled.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Inactivity duration that triggers the idle transition
    pub timeout: Duration,
    /// Lead time before idle at which the warning fires
    pub warning_time: Duration,
    /// Minimum spacing between two activity events treated as separate
    /// reset triggers
    pub throttle: Duration,
    /// Start with tracking disabled
    pub disabled: bool,
}

impl TrackerConfig {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            warning_time: DEFAULT_WARNING_LEAD,
            throttle: DEFAULT_ACTIVITY_THROTTLE,
            disabled: false,
        }
    }
}

/// Observable transition produced by a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Entered the warning window; carries the remaining time until idle
    Warned { remaining: Duration },
    /// Countdown expired with no activity
    Idled,
    /// Left the idle state through activity or an explicit rearm
    Resumed,
}

/// The tracker's state record
///
/// Invariants held across every operation:
/// - `remaining` stays within `[0, timeout]`
/// - the warning fires at most once per idle cycle, before the idle
///   transition, and only when `warning_time < timeout`
/// - a rearm replaces the pending deadline, so nothing stale can fire
#[derive(Debug)]
pub struct IdleStateMachine {
    config: TrackerConfig,
    enabled: bool,
    phase: SessionPhase,
    last_activity: Instant,
    /// Leading-edge throttle bookkeeping for the activity feed; explicit
    /// rearms bypass it
    last_processed: Option<Instant>,
    warning_fired: bool,
}

impl IdleStateMachine {
    pub fn new(config: TrackerConfig, now: Instant) -> Self {
        let enabled = !config.disabled;
        Self {
            config,
            enabled,
            phase: SessionPhase::Active,
            last_activity: now,
            last_processed: None,
            warning_fired: false,
        }
    }

    fn idle_instant(&self) -> Instant {
        self.last_activity + self.config.timeout
    }

    /// Warning instant, or None when the lead time swallows the whole
    /// timeout and no warning is ever scheduled
    fn warning_instant(&self) -> Option<Instant> {
        if self.config.warning_time >= self.config.timeout {
            return None;
        }
        Some(self.idle_instant() - self.config.warning_time)
    }

    /// The next instant at which `poll` has work to do, or None when
    /// nothing is armed (disabled, or already idle)
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.enabled || self.phase == SessionPhase::Idle {
            return None;
        }
        if !self.warning_fired {
            if let Some(warn_at) = self.warning_instant() {
                return Some(warn_at);
            }
        }
        Some(self.idle_instant())
    }

    /// Fire every deadline that `now` has reached, in order.
    ///
    /// When both instants have passed unobserved (a coalesced wakeup after
    /// a clock jump) the warning still fires strictly before idle.
    pub fn poll(&mut self, now: Instant) -> Vec<Transition> {
        let mut fired = Vec::new();
        if !self.enabled || self.phase == SessionPhase::Idle {
            return fired;
        }

        if !self.warning_fired {
            if let Some(warn_at) = self.warning_instant() {
                if now >= warn_at {
                    self.warning_fired = true;
                    self.phase = SessionPhase::Warned;
                    fired.push(Transition::Warned {
                        remaining: self.config.warning_time,
                    });
                }
            }
        }

        if now >= self.idle_instant() {
            self.phase = SessionPhase::Idle;
            fired.push(Transition::Idled);
        }

        fired
    }

    /// Process one qualifying activity event through the throttle.
    ///
    /// Returns the resulting transition, or None when the event was dropped
    /// (throttled or disabled) or the session was already active.
    pub fn record_activity(&mut self, now: Instant) -> Option<Transition> {
        if !self.enabled {
            return None;
        }
        if let Some(processed_at) = self.last_processed {
            if now.duration_since(processed_at) < self.config.throttle {
                return None;
            }
        }
        self.last_processed = Some(now);
        self.rearm(now)
    }

    /// Unconditionally rearm the countdown to the full timeout.
    ///
    /// Clears the idle state and re-arms both the warning and idle firing
    /// points. Returns `Resumed` when leaving idle. No-op while disabled.
    pub fn rearm(&mut self, now: Instant) -> Option<Transition> {
        if !self.enabled {
            return None;
        }
        let was_idle = self.phase == SessionPhase::Idle;
        self.last_activity = now;
        self.phase = SessionPhase::Active;
        self.warning_fired = false;
        if was_idle {
            Some(Transition::Resumed)
        } else {
            None
        }
    }

    /// Enable or disable tracking.
    ///
    /// Disabling cancels the pending deadline; re-enabling re-arms as if
    /// freshly constructed (full timeout, not idle). Neither direction
    /// produces a transition.
    pub fn set_enabled(&mut self, enabled: bool, now: Instant) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.last_activity = now;
        self.phase = SessionPhase::Active;
        self.warning_fired = false;
        self.last_processed = None;
    }

    /// Time left until the idle transition, floored at zero.
    ///
    /// Reports the full timeout while disabled.
    pub fn remaining(&self, now: Instant) -> Duration {
        if !self.enabled {
            return self.config.timeout;
        }
        if self.phase == SessionPhase::Idle {
            return Duration::ZERO;
        }
        self.idle_instant().saturating_duration_since(now)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True while the countdown is running
    pub fn is_counting(&self) -> bool {
        self.enabled && self.phase != SessionPhase::Idle
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn snapshot(&self, now: Instant) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            enabled: self.enabled,
            counting: self.is_counting(),
            remaining: self.remaining(now),
            taken_at: now,
        }
    }
}
