//! Timer entity and its state machine

use std::fmt;

use chrono::{DateTime, Utc};

use super::{Duration, TimerError};

/// Opaque, non-empty timer identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerId(String);

impl TimerId {
    pub fn new(value: impl Into<String>) -> Result<Self, TimerError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TimerError::MissingIdentifier);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bypass the emptiness check to exercise integrity failures
    #[cfg(test)]
    pub(crate) fn unchecked(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Timer status. `Completed` is never stored on a [`Timer`]; a finished
/// running timer is reset to `Stopped` when it is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Stopped,
    Running,
    Paused,
    Completed,
}

/// The single mutable timer entity.
///
/// Methods that depend on time take the current instant explicitly, so the
/// caller decides which clock is sampled. The entity itself is not
/// synchronized; callers must hold exclusive access while mutating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    id: TimerId,
    status: TimerStatus,
    configured_duration: Duration,
    started_at: Option<DateTime<Utc>>,
    remaining_at_pause: Duration,
}

impl Timer {
    /// Create a stopped timer
    pub fn new(id: TimerId) -> Self {
        Self {
            id,
            status: TimerStatus::Stopped,
            configured_duration: Duration::ZERO,
            started_at: None,
            remaining_at_pause: Duration::ZERO,
        }
    }

    /// Start counting down `duration` from `now`
    pub fn start(&mut self, duration: Duration, now: DateTime<Utc>) -> Result<(), TimerError> {
        if self.status == TimerStatus::Running {
            return Err(TimerError::AlreadyRunning);
        }

        self.configured_duration = duration;
        self.remaining_at_pause = duration;
        self.started_at = Some(now);
        self.status = TimerStatus::Running;
        Ok(())
    }

    /// Freeze the remaining time as of `now`
    pub fn pause(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        if self.status != TimerStatus::Running {
            return Err(TimerError::NotRunning);
        }

        self.remaining_at_pause = self.running_remaining(now);
        self.status = TimerStatus::Paused;
        Ok(())
    }

    /// Continue from the paused remaining time
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), TimerError> {
        if self.status != TimerStatus::Paused || self.remaining_at_pause.is_zero() {
            return Err(TimerError::CannotResume);
        }

        self.configured_duration = self.remaining_at_pause;
        self.started_at = Some(now);
        self.status = TimerStatus::Running;
        self.remaining_at_pause = self.configured_duration;
        Ok(())
    }

    /// Return to the initial stopped state. Never fails.
    pub fn reset(&mut self) {
        self.status = TimerStatus::Stopped;
        self.configured_duration = Duration::ZERO;
        self.remaining_at_pause = Duration::ZERO;
        self.started_at = None;
    }

    /// Time left as of `now`, in whole seconds
    pub fn current_remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.status {
            TimerStatus::Running => self.running_remaining(now),
            TimerStatus::Paused => self.remaining_at_pause,
            TimerStatus::Stopped | TimerStatus::Completed => Duration::ZERO,
        }
    }

    /// Running with no time left. Does not transition the timer.
    pub fn is_completed(&self, now: DateTime<Utc>) -> bool {
        self.status == TimerStatus::Running && self.current_remaining(now).is_zero()
    }

    pub fn id(&self) -> &TimerId {
        &self.id
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn configured_duration(&self) -> Duration {
        self.configured_duration
    }

    /// Stale while paused; only meaningful while running
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Only meaningful while paused
    pub fn remaining_at_pause(&self) -> Duration {
        self.remaining_at_pause
    }

    // Elapsed time is the difference of epoch seconds, so fractions are
    // dropped and the countdown never rounds up. A clock stepping backwards
    // counts as zero elapsed.
    fn running_remaining(&self, now: DateTime<Utc>) -> Duration {
        let Some(started_at) = self.started_at else {
            return Duration::ZERO;
        };
        let elapsed = (now.timestamp() - started_at.timestamp()).max(0);
        let elapsed = Duration::from_secs(elapsed.unsigned_abs());
        self.configured_duration - elapsed
    }
}
