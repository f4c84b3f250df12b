//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{SessionPhase, SessionSnapshot};

/// Wire view of the tracker's observable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    pub enabled: bool,
    pub idle: bool,
    pub remaining_seconds: u64,
}

impl SessionView {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            phase: snapshot.phase,
            enabled: snapshot.enabled,
            idle: snapshot.is_idle(),
            remaining_seconds: snapshot.remaining_now().as_secs(),
        }
    }
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionView,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: SessionView) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Create a success response
    pub fn ok(message: String, session: SessionView) -> Self {
        Self::new("ok".to_string(), message, session)
    }

    /// Create an error response
    pub fn error(message: String, session: SessionView) -> Self {
        Self::new("error".to_string(), message, session)
    }
}

/// Enhanced status response with configuration and server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionView,
    pub timeout_seconds: u64,
    pub warning_seconds: u64,
    pub throttle_ms: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub errors: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "1.1.0".to_string(),
        }
    }
}
