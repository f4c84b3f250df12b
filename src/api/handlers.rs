//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{state::AppState, tracker::ActivityKind};
use super::responses::{ApiResponse, HealthResponse, SessionView, StatusResponse};

fn session_view(state: &AppState) -> SessionView {
    SessionView::from_snapshot(&state.session_snapshot())
}

/// Handle POST /activity/:kind - Feed one qualifying activity event
pub async fn activity_handler(
    Path(kind): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(kind) = ActivityKind::from_name(&kind) else {
        warn!("Rejected non-qualifying activity kind: {}", kind);
        return Err(StatusCode::BAD_REQUEST);
    };

    match state.record_activity(kind) {
        Ok(()) => Ok(Json(ApiResponse::ok(
            format!("Activity '{}' recorded", kind),
            session_view(&state),
        ))),
        Err(e) => {
            error!("Failed to record activity: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Rearm the countdown to the full timeout
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset_session() {
        Ok(()) => {
            info!("Reset endpoint called");
            Ok(Json(ApiResponse::ok(
                "Session timer reset".to_string(),
                session_view(&state),
            )))
        }
        Err(e) => {
            error!("Failed to reset session timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /extend - Extend the session ("stay signed in")
pub async fn extend_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.extend_session() {
        Ok(()) => {
            info!("Extend endpoint called");
            Ok(Json(ApiResponse::ok(
                "Session extended".to_string(),
                session_view(&state),
            )))
        }
        Err(e) => {
            error!("Failed to extend session: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /enable - Resume idle tracking
pub async fn enable_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_tracking_enabled(true) {
        Ok(()) => {
            info!("Enable endpoint called - tracking enabled");
            Ok(Json(ApiResponse::ok(
                "Idle tracking enabled".to_string(),
                session_view(&state),
            )))
        }
        Err(e) => {
            error!("Failed to enable tracking: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /disable - Suspend idle tracking
pub async fn disable_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.set_tracking_enabled(false) {
        Ok(()) => {
            info!("Disable endpoint called - tracking disabled");
            Ok(Json(ApiResponse::ok(
                "Idle tracking disabled".to_string(),
                session_view(&state),
            )))
        }
        Err(e) => {
            error!("Failed to disable tracking: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current session status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        session: session_view(&state),
        timeout_seconds: state.timeout.as_secs(),
        warning_seconds: state.warning_time.as_secs(),
        throttle_ms: state.throttle.as_millis() as u64,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
        errors: state.current_errors(),
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
