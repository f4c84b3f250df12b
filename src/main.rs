//! Idle Sentinel - A state-managed HTTP service for session idle tracking
//!
//! This is the main entry point for the idle-sentinel application.

use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tracing::info;

use idle_sentinel::{
    config::Config,
    state::AppState,
    tracker::{ActivitySurface, IdleSessionTracker},
    api::create_router,
    services::shell_hooks,
    tasks::clock_recovery_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("idle_sentinel={},tower_http=info", config.log_level()))
        .init();

    info!("Starting idle-sentinel server v1.1.0");
    info!(
        "Configuration: host={}, port={}, timeout={}s, warning={}s, throttle={}ms",
        config.host, config.port, config.timeout, config.warning, config.throttle_ms
    );
    config.warn_on_degenerate_values();

    // Shared error ledger, written by the idle action and read by /status
    let errors = Arc::new(Mutex::new(Vec::new()));

    // Spawn the tracker against its monitored surface
    let surface = ActivitySurface::default();
    let hooks = shell_hooks(&config, Arc::clone(&errors));
    let tracker = IdleSessionTracker::spawn(config.tracker(), hooks, &surface);

    // Create application state
    let state = Arc::new(AppState::new(&config, surface, tracker, errors));

    // Start the clock-jump recovery background task
    let recovery_state = Arc::clone(&state);
    tokio::spawn(async move {
        clock_recovery_task(recovery_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /activity/:kind - Record a qualifying activity event");
    info!("  POST /reset          - Rearm the idle countdown");
    info!("  POST /extend         - Extend the session");
    info!("  POST /enable         - Resume idle tracking");
    info!("  POST /disable        - Suspend idle tracking");
    info!("  GET  /status         - Check session status and countdown");
    info!("  GET  /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop the driver so no hook fires during teardown
    state.tracker.shutdown();

    info!("Server shutdown complete");
    Ok(())
}
