//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, State},
    response::Json,
};
use tracing::info;

use crate::state::AppState;
use super::{
    error::ApiError,
    responses::{HealthResponse, StartTimerRequest, StatusResponse, TimerStateResponse},
};

type TimerResult = Result<Json<TimerStateResponse>, ApiError>;

/// Handle GET /api/timer - Return the current timer state
pub async fn timer_state_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> TimerResult {
    state.timer.current_state()
        .map(|snapshot| Json(snapshot.into()))
        .map_err(|e| ApiError::new(e, uri.path()))
}

/// Handle POST /api/timer/start?durationSeconds=N - Start the timer
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<StartTimerRequest>, QueryRejection>,
) -> TimerResult {
    let Query(request) = query
        .map_err(|rejection| ApiError::invalid_parameter(rejection.body_text(), uri.path()))?;
    request.validate().map_err(|e| ApiError::new(e, uri.path()))?;

    let snapshot = state
        .perform("start", |timer| timer.start(request.duration_seconds))
        .map_err(|e| ApiError::new(e, uri.path()))?;

    info!("Start endpoint called - timer running for {}s", request.duration_seconds);
    Ok(Json(snapshot.into()))
}

/// Handle POST /api/timer/pause - Pause the running timer
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> TimerResult {
    state.perform("pause", |timer| timer.pause())
        .map(|snapshot| Json(snapshot.into()))
        .map_err(|e| ApiError::new(e, uri.path()))
}

/// Handle POST /api/timer/resume - Resume the paused timer
pub async fn resume_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> TimerResult {
    state.perform("resume", |timer| timer.resume())
        .map(|snapshot| Json(snapshot.into()))
        .map_err(|e| ApiError::new(e, uri.path()))
}

/// Handle POST /api/timer/reset - Reset the timer
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> TimerResult {
    state.perform("reset", |timer| timer.reset())
        .map(|snapshot| Json(snapshot.into()))
        .map_err(|e| ApiError::new(e, uri.path()))
}

/// Handle GET /status - Return server status with the timer state
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = state.timer.current_state()
        .map_err(|e| ApiError::new(e, uri.path()))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: snapshot.into(),
        timer_id: state.timer.timer_id().to_string(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
