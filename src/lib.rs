//! Idle Sentinel - A state-managed HTTP service for session idle tracking
//!
//! This library tracks qualifying user activity on a monitored surface and
//! counts down toward an idle threshold, firing a one-shot warning ahead of
//! expiry and an idle notification at expiry. The HTTP shell feeds activity
//! events in and binds the idle transition to an operator-configured action.

pub mod config;
pub mod state;
pub mod tracker;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, SessionPhase, SessionSnapshot};
pub use tracker::{
    ActivityKind, ActivitySurface, IdleHooks, IdleSessionTracker, TrackerConfig,
};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
