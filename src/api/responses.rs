//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Duration, TimerError, MAX_DURATION},
    services::TimerSnapshot,
};

/// Query parameters for POST /api/timer/start
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTimerRequest {
    pub duration_seconds: i64,
}

impl StartTimerRequest {
    /// Reject durations outside (0, 24h] before they reach the timer
    pub fn validate(&self) -> Result<(), TimerError> {
        if self.duration_seconds <= 0 {
            return Err(TimerError::DurationTooShort(self.duration_seconds));
        }
        if self.duration_seconds > MAX_DURATION.as_secs_i64() {
            return Err(TimerError::DurationTooLong {
                seconds: self.duration_seconds,
                max: MAX_DURATION.as_secs(),
            });
        }
        Ok(())
    }
}

/// Timer state as returned by every /api/timer endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStateResponse {
    pub running: bool,
    /// Epoch seconds, 0 when the timer has never been started since reset
    pub start_time: i64,
    pub duration_seconds: i64,
    pub remaining_seconds: i64,
    pub current_remaining_seconds: i64,
    /// Current remaining time as HH:MM:SS
    pub formatted_remaining: String,
}

impl From<TimerSnapshot> for TimerStateResponse {
    fn from(snapshot: TimerSnapshot) -> Self {
        let formatted = Duration::new(snapshot.current_remaining_seconds)
            .unwrap_or(Duration::ZERO)
            .to_string();

        Self {
            running: snapshot.running,
            start_time: snapshot.started_at_epoch_seconds,
            duration_seconds: snapshot.configured_duration_seconds,
            remaining_seconds: snapshot.remaining_at_transition_seconds,
            current_remaining_seconds: snapshot.current_remaining_seconds,
            formatted_remaining: formatted,
        }
    }
}

/// Uniform error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub path: String,
}

/// Server status with the current timer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerStateResponse,
    pub timer_id: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
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
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
