//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::tracker::{ActivityKind, ActivitySurface, IdleSessionTracker};
use super::SessionSnapshot;

/// Main application state: the monitored surface, the tracker handle, and
/// server metadata
#[derive(Debug)]
pub struct AppState {
    /// Activity feed the tracker subscribes to
    pub surface: ActivitySurface,
    /// Handle to the spawned idle-session tracker
    pub tracker: IdleSessionTracker,
    /// Configuration echo for the status endpoint
    pub timeout: Duration,
    pub warning_time: Duration,
    pub throttle: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Errors recorded by the idle action for client visibility
    pub errors: Arc<Mutex<Vec<String>>>,
}

impl AppState {
    /// Assemble the application state around an already spawned tracker.
    ///
    /// The error ledger is shared with the idle-action hook, which is why it
    /// arrives pre-built.
    pub fn new(
        config: &Config,
        surface: ActivitySurface,
        tracker: IdleSessionTracker,
        errors: Arc<Mutex<Vec<String>>>,
    ) -> Self {
        Self {
            surface,
            tracker,
            timeout: Duration::from_secs(config.timeout),
            warning_time: Duration::from_secs(config.warning),
            throttle: Duration::from_millis(config.throttle_ms),
            start_time: Instant::now(),
            port: config.port,
            host: config.host.clone(),
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            errors,
        }
    }

    /// Feed one qualifying activity event into the monitored surface
    pub fn record_activity(&self, kind: ActivityKind) -> Result<(), String> {
        self.surface.emit(kind);
        self.note_action(kind.as_str())
    }

    /// Rearm the countdown to the full timeout
    pub fn reset_session(&self) -> Result<(), String> {
        info!("Session timer reset requested");
        self.tracker.reset_timer();
        self.note_action("reset")
    }

    /// Rearm the countdown on behalf of an explicit "stay signed in"
    pub fn extend_session(&self) -> Result<(), String> {
        info!("Session extension requested");
        self.tracker.extend_session();
        self.note_action("extend")
    }

    /// Enable or disable tracking
    pub fn set_tracking_enabled(&self, enabled: bool) -> Result<(), String> {
        info!("Setting tracking enabled to: {}", enabled);
        self.tracker.set_enabled(enabled);
        self.note_action(if enabled { "enable" } else { "disable" })
    }

    /// Latest published tracker snapshot
    pub fn session_snapshot(&self) -> SessionSnapshot {
        self.tracker.snapshot()
    }

    /// Record the most recent client-driven action
    pub fn note_action(&self, action: &str) -> Result<(), String> {
        let mut last_action = self.last_action.lock()
            .map_err(|e| format!("Failed to lock last action: {}", e))?;
        *last_action = Some(action.to_string());
        drop(last_action);

        let mut last_time = self.last_action_time.lock()
            .map_err(|e| format!("Failed to lock last action time: {}", e))?;
        *last_time = Some(Utc::now());

        Ok(())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Add an error to the ledger
    pub fn add_error(&self, error: String) -> Result<(), String> {
        warn!("Recording error: {}", error);
        let mut errors = self.errors.lock()
            .map_err(|e| format!("Failed to lock error ledger: {}", e))?;
        errors.push(error);
        Ok(())
    }

    /// Current error ledger contents
    pub fn current_errors(&self) -> Vec<String> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let elapsed = self.start_time.elapsed().as_secs();
        let hours = elapsed / 3600;
        let minutes = (elapsed % 3600) / 60;
        let seconds = elapsed % 60;

        match (hours, minutes) {
            (0, 0) => format!("{}s", seconds),
            (0, _) => format!("{}m {}s", minutes, seconds),
            _ => format!("{}h {}m {}s", hours, minutes, seconds),
        }
    }
}
