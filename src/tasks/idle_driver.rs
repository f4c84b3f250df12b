//! Idle countdown driver task
//!
//! Single owner of the tracker state machine. The loop recomputes the next
//! deadline after every state change, so a rearm atomically replaces any
//! pending warning/idle firing. The select is biased: commands (including
//! shutdown) win over a coalesced deadline wakeup, which is what guarantees
//! no hook fires after teardown.

use std::time::Duration;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::state::SessionSnapshot;
use crate::tracker::activity::ActivityKind;
use crate::tracker::handle::{Command, IdleHooks};
use crate::tracker::machine::{IdleStateMachine, Transition};

/// Drive the idle state machine: arm deadlines, process activity and
/// control commands, publish snapshots, and invoke hooks on transitions
pub async fn idle_driver_task(
    mut machine: IdleStateMachine,
    mut hooks: IdleHooks,
    mut commands: mpsc::UnboundedReceiver<Command>,
    mut activity: broadcast::Receiver<ActivityKind>,
    snapshots: watch::Sender<SessionSnapshot>,
) {
    info!(
        "Starting idle driver: timeout={}s, warning={}s, throttle={}ms, enabled={}",
        machine.config().timeout.as_secs(),
        machine.config().warning_time.as_secs(),
        machine.config().throttle.as_millis(),
        machine.is_enabled(),
    );

    // once-per-second snapshot refresh while the countdown is running
    let mut countdown = interval(Duration::from_secs(1));
    countdown.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut surface_open = true;

    loop {
        let deadline = machine.next_deadline();

        tokio::select! {
            biased;

            command = commands.recv() => {
                let now = Instant::now();
                match command {
                    None | Some(Command::Shutdown) => {
                        info!("Idle driver shutting down, cancelling pending deadlines");
                        break;
                    }
                    Some(Command::Reset) => {
                        debug!("Timer reset requested");
                        fire(&mut hooks, machine.rearm(now));
                    }
                    Some(Command::Extend) => {
                        debug!("Session extension requested");
                        fire(&mut hooks, machine.rearm(now));
                    }
                    Some(Command::SetEnabled(enabled)) => {
                        info!("Tracking {}", if enabled { "enabled" } else { "disabled" });
                        machine.set_enabled(enabled, now);
                    }
                    Some(Command::Resync) => {
                        debug!("Deadline resync requested");
                        for transition in machine.poll(now) {
                            fire(&mut hooks, Some(transition));
                        }
                    }
                }
                publish(&machine, &snapshots);
            }

            event = activity.recv(), if surface_open => {
                match event {
                    Ok(kind) => {
                        let now = Instant::now();
                        debug!("Qualifying activity observed: {}", kind);
                        fire(&mut hooks, machine.record_activity(now));
                        publish(&machine, &snapshots);
                    }
                    Err(broadcast::error::RecvError::Lagged(dropped)) => {
                        // dropped events are redundant rearms, safe to skip
                        warn!("Activity feed lagged, {} events skipped", dropped);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Activity surface closed, continuing on commands only");
                        surface_open = false;
                    }
                }
            }

            _ = async { sleep_until(deadline.unwrap()).await }, if deadline.is_some() => {
                for transition in machine.poll(Instant::now()) {
                    fire(&mut hooks, Some(transition));
                }
                publish(&machine, &snapshots);
            }

            _ = countdown.tick(), if machine.is_counting() => {
                publish(&machine, &snapshots);
            }
        }
    }
}

/// Invoke the hook matching a transition, if any
fn fire(hooks: &mut IdleHooks, transition: Option<Transition>) {
    match transition {
        Some(Transition::Warned { remaining }) => {
            info!("Inactivity warning: {}s until idle", remaining.as_secs());
            if let Some(hook) = hooks.on_warning.as_mut() {
                hook(remaining);
            }
        }
        Some(Transition::Idled) => {
            info!("Session went idle");
            if let Some(hook) = hooks.on_idle.as_mut() {
                hook();
            }
        }
        Some(Transition::Resumed) => {
            info!("Session resumed from idle");
            if let Some(hook) = hooks.on_active.as_mut() {
                hook();
            }
        }
        None => {}
    }
}

/// Publish the current snapshot to watch subscribers
fn publish(machine: &IdleStateMachine, snapshots: &watch::Sender<SessionSnapshot>) {
    if snapshots.send(machine.snapshot(Instant::now())).is_err() {
        debug!("Snapshot dropped: no remaining subscribers");
    }
}
