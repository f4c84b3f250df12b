//! Idle-session tracking core
//!
//! The tracker watches a feed of qualifying activity events and counts down
//! toward an idle threshold, firing a one-shot warning ahead of expiry and
//! an idle notification at expiry. State lives in a pure machine owned by a
//! single driver task; callers hold a lightweight handle.

pub mod activity;
pub mod machine;
pub mod handle;

// Re-export main types
pub use activity::{ActivityKind, ActivitySurface};
pub use machine::{IdleStateMachine, TrackerConfig, Transition};
pub use machine::{DEFAULT_ACTIVITY_THROTTLE, DEFAULT_WARNING_LEAD};
pub use handle::{Command, IdleHooks, IdleSessionTracker};
