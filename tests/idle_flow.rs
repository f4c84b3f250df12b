//! End-to-end behavior of the spawned tracker under a paused runtime clock

use std::sync::{Arc, Mutex};
use std::time::Duration;

use idle_sentinel::tracker::{ActivityKind, ActivitySurface, IdleHooks, IdleSessionTracker, TrackerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Warning(u64),
    Idle,
    Active,
}

fn recording_hooks() -> (IdleHooks, Arc<Mutex<Vec<Event>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));

    let warn_log = Arc::clone(&events);
    let idle_log = Arc::clone(&events);
    let active_log = Arc::clone(&events);

    let hooks = IdleHooks::new()
        .on_warning(move |remaining| {
            warn_log.lock().unwrap().push(Event::Warning(remaining.as_secs()));
        })
        .on_idle(move || {
            idle_log.lock().unwrap().push(Event::Idle);
        })
        .on_active(move || {
            active_log.lock().unwrap().push(Event::Active);
        });

    (hooks, events)
}

fn config(timeout: Duration, warning: Duration) -> TrackerConfig {
    TrackerConfig {
        timeout,
        warning_time: warning,
        throttle: Duration::from_secs(1),
        disabled: false,
    }
}

/// Let the driver task drain ready channel messages without moving the clock
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

async fn elapse(duration: Duration) {
    tokio::time::sleep(duration).await;
    settle().await;
}

fn recorded(events: &Arc<Mutex<Vec<Event>>>) -> Vec<Event> {
    events.lock().unwrap().clone()
}

#[tokio::test(start_paused = true)]
async fn warning_fires_once_then_idle() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(5), Duration::from_secs(2)),
        hooks,
        &surface,
    );

    elapse(Duration::from_millis(2900)).await;
    assert!(recorded(&events).is_empty());

    elapse(Duration::from_millis(200)).await;
    assert_eq!(recorded(&events), vec![Event::Warning(2)]);
    assert!(!tracker.is_idle());

    elapse(Duration::from_secs(2)).await;
    assert_eq!(recorded(&events), vec![Event::Warning(2), Event::Idle]);
    assert!(tracker.is_idle());
    assert_eq!(tracker.remaining(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn no_warning_when_lead_covers_timeout() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let _tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(2), Duration::from_secs(2)),
        hooks,
        &surface,
    );

    elapse(Duration::from_secs(10)).await;
    assert_eq!(recorded(&events), vec![Event::Idle]);
}

#[tokio::test(start_paused = true)]
async fn activity_defers_the_idle_instant() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(5), Duration::from_secs(10)),
        hooks,
        &surface,
    );

    elapse(Duration::from_millis(2500)).await;
    surface.emit(ActivityKind::PointerDown);
    settle().await;
    assert_eq!(tracker.remaining(), Duration::from_secs(5));

    // the original firing point at t=5s must not fire
    elapse(Duration::from_millis(2700)).await;
    assert!(recorded(&events).is_empty());
    assert!(!tracker.is_idle());

    // idle arrives at t≈7.5s instead
    elapse(Duration::from_millis(2400)).await;
    assert_eq!(recorded(&events), vec![Event::Idle]);
}

#[tokio::test(start_paused = true)]
async fn extend_after_idle_resumes_and_rearms() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(1), Duration::from_secs(10)),
        hooks,
        &surface,
    );

    elapse(Duration::from_millis(1100)).await;
    assert_eq!(recorded(&events), vec![Event::Idle]);
    assert!(tracker.is_idle());

    tracker.extend_session();
    settle().await;
    assert_eq!(recorded(&events), vec![Event::Idle, Event::Active]);
    assert!(!tracker.is_idle());
    assert_eq!(tracker.remaining(), Duration::from_secs(1));

    // the fresh countdown runs a full cycle again
    elapse(Duration::from_millis(1100)).await;
    assert_eq!(recorded(&events), vec![Event::Idle, Event::Active, Event::Idle]);
}

#[tokio::test(start_paused = true)]
async fn reset_while_active_stays_silent() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(1), Duration::from_secs(10)),
        hooks,
        &surface,
    );

    elapse(Duration::from_millis(500)).await;
    tracker.reset_timer();
    settle().await;
    assert!(recorded(&events).is_empty());

    // idle moved from t=1.0s to t=1.5s
    elapse(Duration::from_millis(700)).await;
    assert!(recorded(&events).is_empty());
    elapse(Duration::from_millis(400)).await;
    assert_eq!(recorded(&events), vec![Event::Idle]);
}

#[tokio::test(start_paused = true)]
async fn disabled_tracker_never_fires() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let mut cfg = config(Duration::from_secs(1), Duration::from_secs(10));
    cfg.disabled = true;
    let tracker = IdleSessionTracker::spawn(cfg, hooks, &surface);

    surface.emit(ActivityKind::Click);
    elapse(Duration::from_secs(10)).await;
    assert!(recorded(&events).is_empty());
    assert!(!tracker.is_idle());
    assert_eq!(tracker.remaining(), Duration::from_secs(1));

    // enabling starts a fresh countdown
    tracker.set_enabled(true);
    settle().await;
    elapse(Duration::from_millis(1100)).await;
    assert_eq!(recorded(&events), vec![Event::Idle]);
}

#[tokio::test(start_paused = true)]
async fn disable_cancels_pending_firings() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(2), Duration::from_secs(10)),
        hooks,
        &surface,
    );

    elapse(Duration::from_secs(1)).await;
    tracker.set_enabled(false);
    settle().await;

    elapse(Duration::from_secs(5)).await;
    assert!(recorded(&events).is_empty());

    tracker.set_enabled(true);
    settle().await;
    elapse(Duration::from_millis(2100)).await;
    assert_eq!(recorded(&events), vec![Event::Idle]);
}

#[tokio::test(start_paused = true)]
async fn activity_burst_rearms_once_per_throttle_window() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(10), Duration::from_secs(30)),
        hooks,
        &surface,
    );

    elapse(Duration::from_secs(3)).await;
    for _ in 0..10 {
        surface.emit(ActivityKind::PointerMove);
    }
    settle().await;
    assert_eq!(tracker.remaining(), Duration::from_secs(10));

    // still inside the throttle window: dropped, countdown keeps falling
    elapse(Duration::from_millis(500)).await;
    surface.emit(ActivityKind::PointerMove);
    settle().await;
    assert_eq!(tracker.remaining(), Duration::from_millis(9500));

    // past the window: processed again
    elapse(Duration::from_millis(600)).await;
    surface.emit(ActivityKind::PointerMove);
    settle().await;
    assert_eq!(tracker.remaining(), Duration::from_secs(10));

    assert!(recorded(&events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_suppresses_pending_callbacks() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(2), Duration::from_secs(1)),
        hooks,
        &surface,
    );

    elapse(Duration::from_millis(500)).await;
    tracker.shutdown();
    settle().await;

    elapse(Duration::from_secs(10)).await;
    assert!(recorded(&events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_tears_the_driver_down() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(1), Duration::from_secs(10)),
        hooks,
        &surface,
    );

    drop(tracker);
    settle().await;

    // the surface has no subscriber left; emitting must not panic
    surface.emit(ActivityKind::KeyPress);
    elapse(Duration::from_secs(5)).await;
    assert!(recorded(&events).is_empty());
}

#[tokio::test(start_paused = true)]
async fn remaining_tracks_the_countdown() {
    let surface = ActivitySurface::default();
    let (hooks, _events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(5), Duration::from_secs(10)),
        hooks,
        &surface,
    );

    assert_eq!(tracker.remaining(), Duration::from_secs(5));

    elapse(Duration::from_secs(1)).await;
    assert_eq!(tracker.remaining(), Duration::from_secs(4));

    elapse(Duration::from_secs(2)).await;
    assert_eq!(tracker.remaining(), Duration::from_secs(2));

    elapse(Duration::from_millis(2100)).await;
    assert_eq!(tracker.remaining(), Duration::ZERO);
    assert!(tracker.is_idle());
}

#[tokio::test(start_paused = true)]
async fn resync_fires_overdue_deadlines_immediately() {
    let surface = ActivitySurface::default();
    let (hooks, events) = recording_hooks();
    let tracker = IdleSessionTracker::spawn(
        config(Duration::from_secs(5), Duration::from_secs(2)),
        hooks,
        &surface,
    );

    // resync with nothing overdue is a no-op
    tracker.resync();
    settle().await;
    assert!(recorded(&events).is_empty());

    // resync after a firing must not duplicate it
    elapse(Duration::from_millis(3100)).await;
    assert_eq!(recorded(&events), vec![Event::Warning(2)]);
    tracker.resync();
    settle().await;
    assert_eq!(recorded(&events), vec![Event::Warning(2)]);
}
