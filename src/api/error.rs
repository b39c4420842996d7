//! Mapping of timer errors onto HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use tracing::{error, warn};

use crate::domain::TimerError;
use super::responses::ErrorResponse;

/// Stable error codes exposed to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    TimerAlreadyRunning,
    TimerNotRunning,
    TimerCannotResume,
    TimerNotFound,
    InvalidDuration,
    DurationTooShort,
    DurationTooLong,
    InvalidParameter,
    DataAccessError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::TimerAlreadyRunning
            | ErrorCode::TimerNotRunning
            | ErrorCode::TimerCannotResume => StatusCode::CONFLICT,
            ErrorCode::TimerNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidDuration
            | ErrorCode::DurationTooShort
            | ErrorCode::DurationTooLong
            | ErrorCode::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorCode::DataAccessError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TimerAlreadyRunning => "TIMER_001",
            ErrorCode::TimerNotRunning => "TIMER_002",
            ErrorCode::TimerCannotResume => "TIMER_004",
            ErrorCode::TimerNotFound => "TIMER_005",
            ErrorCode::InvalidDuration => "VALIDATION_001",
            ErrorCode::DurationTooShort => "VALIDATION_002",
            ErrorCode::DurationTooLong => "VALIDATION_003",
            ErrorCode::InvalidParameter => "VALIDATION_004",
            ErrorCode::DataAccessError => "SYSTEM_002",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::TimerAlreadyRunning => "The timer is already running",
            ErrorCode::TimerNotRunning => "The timer is not running",
            ErrorCode::TimerCannotResume => "The timer cannot be resumed in its current state",
            ErrorCode::TimerNotFound => "The timer could not be found",
            ErrorCode::InvalidDuration => "Invalid timer duration",
            ErrorCode::DurationTooShort => "The timer duration is too short",
            ErrorCode::DurationTooLong => "The timer duration is too long (max 24 hours)",
            ErrorCode::InvalidParameter => "Invalid parameter",
            ErrorCode::DataAccessError => "An error occurred while accessing timer data",
        }
    }
}

impl From<&TimerError> for ErrorCode {
    fn from(err: &TimerError) -> Self {
        match err {
            TimerError::InvalidDuration(_) => ErrorCode::InvalidDuration,
            TimerError::DurationTooShort(_) => ErrorCode::DurationTooShort,
            TimerError::DurationTooLong { .. } => ErrorCode::DurationTooLong,
            TimerError::AlreadyRunning => ErrorCode::TimerAlreadyRunning,
            TimerError::NotRunning => ErrorCode::TimerNotRunning,
            TimerError::CannotResume => ErrorCode::TimerCannotResume,
            TimerError::NullTimer => ErrorCode::TimerNotFound,
            TimerError::MissingIdentifier => ErrorCode::InvalidParameter,
            TimerError::Repository(_) => ErrorCode::DataAccessError,
        }
    }
}

/// An error response for a given request path
#[derive(Debug)]
pub struct ApiError {
    pub code: ErrorCode,
    pub details: String,
    pub path: String,
}

impl ApiError {
    pub fn new(err: TimerError, path: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::from(&err),
            details: err.to_string(),
            path: path.into(),
        }
    }

    pub fn invalid_parameter(details: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidParameter,
            details: details.into(),
            path: path.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        if status.is_server_error() {
            error!("{} at {}: {}", self.code.code(), self.path, self.details);
        } else {
            warn!("{} at {}: {}", self.code.code(), self.path, self.details);
        }

        let body = ErrorResponse {
            code: self.code.code().to_string(),
            message: self.code.message().to_string(),
            details: Some(self.details),
            timestamp: Utc::now(),
            path: self.path,
        };

        (status, Json(body)).into_response()
    }
}
