//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers, response structures,
//! error mapping and request logging.

pub mod error;
pub mod handlers;
pub mod logging;
pub mod responses;

use std::sync::Arc;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/timer", get(timer_state_handler))
        .route("/api/timer/start", post(start_handler))
        .route("/api/timer/pause", post(pause_handler))
        .route("/api/timer/resume", post(resume_handler))
        .route("/api/timer/reset", post(reset_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(middleware::from_fn(logging::log_api_requests))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
