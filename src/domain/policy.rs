//! Stateless transition rules for the timer

use chrono::{DateTime, Utc};
use tracing::info;

use super::{Duration, Timer, TimerError, TimerStatus};

/// Longest duration a timer may be started with (24 hours)
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 3600);

/// Domain policy deciding whether a transition may happen now and
/// handling auto-reset of a finished timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerPolicy;

impl TimerPolicy {
    pub fn new() -> Self {
        Self
    }

    /// A stopped or paused timer may be started with a positive duration of
    /// at most [`MAX_DURATION`]
    pub fn can_start(&self, timer: &Timer, duration: Option<Duration>) -> bool {
        if timer.status() == TimerStatus::Running {
            return false;
        }

        match duration {
            Some(duration) => !duration.is_zero() && duration <= MAX_DURATION,
            None => false,
        }
    }

    pub fn can_pause(&self, timer: &Timer) -> bool {
        timer.status() == TimerStatus::Running
    }

    pub fn can_resume(&self, timer: &Timer) -> bool {
        timer.status() == TimerStatus::Paused && timer.remaining_at_pause().is_positive()
    }

    /// Reset the timer if it ran out. Returns whether it did.
    pub fn complete_if_finished(&self, timer: &mut Timer, now: DateTime<Utc>) -> bool {
        if !timer.is_completed(now) {
            return false;
        }

        info!(
            "Timer {} completed after {}, resetting",
            timer.id(),
            timer.configured_duration()
        );
        timer.reset();
        true
    }

    /// Check the timer is present, then self-heal a finished timer.
    /// Returns whether the timer was reset.
    pub fn validate(&self, timer: Option<&mut Timer>, now: DateTime<Utc>) -> Result<bool, TimerError> {
        let timer = timer.ok_or(TimerError::NullTimer)?;
        if timer.id().as_str().trim().is_empty() {
            return Err(TimerError::MissingIdentifier);
        }

        Ok(self.complete_if_finished(timer, now))
    }
}
