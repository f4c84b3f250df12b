//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod snapshot;
pub mod app_state;

// Re-export main types
pub use snapshot::{SessionPhase, SessionSnapshot};
pub use app_state::AppState;
