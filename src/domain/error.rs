//! Domain error type shared by the timer core and its callers

use thiserror::Error;

/// Every way a timer operation can be rejected.
///
/// Validation and state-transition errors are deterministic: repeating the
/// same call against the same state yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// A duration was constructed from a negative second count
    #[error("Duration cannot be negative: {0}")]
    InvalidDuration(i64),

    /// Requested duration is zero or negative
    #[error("Duration must be positive: {0} seconds")]
    DurationTooShort(i64),

    /// Requested duration exceeds the 24-hour ceiling
    #[error("Duration cannot exceed 24 hours: {seconds} seconds (max {max})")]
    DurationTooLong { seconds: i64, max: u64 },

    #[error("Timer is already running")]
    AlreadyRunning,

    #[error("Timer is not running")]
    NotRunning,

    /// Timer is not paused, or is paused with no time left
    #[error("Cannot resume timer in current state")]
    CannotResume,

    #[error("Timer cannot be null")]
    NullTimer,

    #[error("Timer ID cannot be null or empty")]
    MissingIdentifier,

    /// The repository could not serve the request (e.g. a poisoned lock)
    #[error("Repository error: {0}")]
    Repository(String),
}
