//! Tracker handle: spawn, control operations, and observable state

use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::state::SessionSnapshot;
use crate::tasks::idle_driver_task;
use super::activity::ActivitySurface;
use super::machine::{IdleStateMachine, TrackerConfig};

/// Control commands accepted by the driver task
#[derive(Debug, Clone, Copy)]
pub enum Command {
    Reset,
    Extend,
    SetEnabled(bool),
    /// Re-evaluate deadlines immediately, e.g. after a suspected clock jump
    Resync,
    Shutdown,
}

/// Notification hooks invoked synchronously from the driver task.
///
/// Hooks are fire-and-forget; anything slow or fallible belongs in a task
/// the hook spawns, not in the hook body.
#[derive(Default)]
pub struct IdleHooks {
    pub(crate) on_idle: Option<Box<dyn FnMut() + Send>>,
    pub(crate) on_warning: Option<Box<dyn FnMut(Duration) + Send>>,
    pub(crate) on_active: Option<Box<dyn FnMut() + Send>>,
}

impl IdleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoked exactly once per idle transition
    pub fn on_idle(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_idle = Some(Box::new(hook));
        self
    }

    /// Invoked at most once per idle cycle with the remaining lead time
    pub fn on_warning(mut self, hook: impl FnMut(Duration) + Send + 'static) -> Self {
        self.on_warning = Some(Box::new(hook));
        self
    }

    /// Invoked when activity or an explicit rearm leaves the idle state
    pub fn on_active(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.on_active = Some(Box::new(hook));
        self
    }
}

/// Handle to a spawned idle-session tracker.
///
/// All mutation happens inside the driver task; the handle only sends
/// commands and reads published snapshots. Dropping the handle tears the
/// driver down; no hook runs after that point.
#[derive(Debug)]
pub struct IdleSessionTracker {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
    driver: JoinHandle<()>,
}

impl IdleSessionTracker {
    /// Spawn the driver task, subscribed to the given activity surface
    pub fn spawn(config: TrackerConfig, hooks: IdleHooks, surface: &ActivitySurface) -> Self {
        let now = Instant::now();
        let machine = IdleStateMachine::new(config, now);
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot(now));
        let activity_rx = surface.subscribe();

        let driver = tokio::spawn(idle_driver_task(
            machine,
            hooks,
            command_rx,
            activity_rx,
            snapshot_tx,
        ));

        Self {
            commands: command_tx,
            snapshots: snapshot_rx,
            driver,
        }
    }

    /// Rearm the countdown to the full timeout. No-op while disabled.
    pub fn reset_timer(&self) {
        self.send(Command::Reset);
    }

    /// Same rearm as `reset_timer`, named for explicit "stay signed in"
    /// call sites
    pub fn extend_session(&self) {
        self.send(Command::Extend);
    }

    /// Enable or disable tracking; re-enabling starts a fresh countdown
    pub fn set_enabled(&self, enabled: bool) {
        self.send(Command::SetEnabled(enabled));
    }

    /// Ask the driver to re-evaluate deadlines immediately
    pub fn resync(&self) {
        self.send(Command::Resync);
    }

    /// Stop the driver task; pending deadlines are cancelled and no hook
    /// fires afterwards
    pub fn shutdown(&self) {
        self.send(Command::Shutdown);
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            debug!("Tracker command {:?} dropped: driver already stopped", command);
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Time left until the idle transition, floored at zero
    pub fn remaining(&self) -> Duration {
        self.snapshot().remaining_now()
    }

    /// Check if the session is currently idle
    pub fn is_idle(&self) -> bool {
        self.snapshot().is_idle()
    }

    /// Subscribe to snapshot updates (per transition, plus once per second
    /// while the countdown is running)
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }
}

impl Drop for IdleSessionTracker {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        // the driver fires hooks; make sure none outlive the handle
        self.driver.abort();
    }
}
