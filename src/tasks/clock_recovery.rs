//! Clock-jump recovery background task

use std::{sync::Arc, time::Duration};
use chrono::Utc;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::state::AppState;

/// Wall clock may run ahead of the monotonic clock by this much before a
/// suspend/resume jump is assumed
const CLOCK_JUMP_THRESHOLD: Duration = Duration::from_secs(30);

/// Background task that detects system suspend/resume by comparing
/// wall-clock and monotonic elapsed time, and resyncs idle deadlines after
/// a jump so a stale sleep does not delay the idle transition
pub async fn clock_recovery_task(state: Arc<AppState>) {
    info!("Starting clock recovery task");

    let mut ticker = interval(Duration::from_secs(15));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut wall_mark = Utc::now();
    let mut mono_mark = Instant::now();

    loop {
        ticker.tick().await;

        let wall_elapsed = (Utc::now() - wall_mark)
            .to_std()
            .unwrap_or(Duration::ZERO);
        let mono_elapsed = mono_mark.elapsed();

        if wall_elapsed > mono_elapsed + CLOCK_JUMP_THRESHOLD {
            let jump = wall_elapsed - mono_elapsed;
            info!(
                "Wall clock jumped ~{}s ahead of monotonic time, resyncing idle deadlines",
                jump.as_secs()
            );
            state.tracker.resync();
            if let Err(e) = state.note_action("clock-resync") {
                warn!("Failed to record clock resync action: {}", e);
            }
        }

        wall_mark = Utc::now();
        mono_mark = Instant::now();
    }
}
