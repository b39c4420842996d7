//! Timer use cases: load the timer, apply a transition, save it back

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{
    Clock, Duration, Timer, TimerError, TimerId, TimerPolicy, TimerRepository, TimerStatus,
    MAX_DURATION,
};

/// Point-in-time view of the timer handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub running: bool,
    /// Epoch seconds of the last start/resume, 0 if absent
    pub started_at_epoch_seconds: i64,
    pub configured_duration_seconds: i64,
    pub remaining_at_transition_seconds: i64,
    pub current_remaining_seconds: i64,
}

impl TimerSnapshot {
    pub fn capture(timer: &Timer, now: DateTime<Utc>) -> Self {
        Self {
            running: timer.status() == TimerStatus::Running,
            started_at_epoch_seconds: timer.started_at().map(|t| t.timestamp()).unwrap_or(0),
            configured_duration_seconds: timer.configured_duration().as_secs_i64(),
            remaining_at_transition_seconds: timer.remaining_at_pause().as_secs_i64(),
            current_remaining_seconds: timer.current_remaining(now).as_secs_i64(),
        }
    }
}

/// Application service owning the single configured timer
pub struct TimerService {
    repository: Arc<dyn TimerRepository>,
    clock: Arc<dyn Clock>,
    policy: TimerPolicy,
    timer_id: TimerId,
    /// Held across every load-mutate-save so transitions never interleave
    guard: Mutex<()>,
}

impl TimerService {
    pub fn new(repository: Arc<dyn TimerRepository>, clock: Arc<dyn Clock>, timer_id: TimerId) -> Self {
        Self {
            repository,
            clock,
            policy: TimerPolicy::new(),
            timer_id,
            guard: Mutex::new(()),
        }
    }

    pub fn timer_id(&self) -> &TimerId {
        &self.timer_id
    }

    /// Current state, resetting the timer first if it has run out
    pub fn current_state(&self) -> Result<TimerSnapshot, TimerError> {
        self.exclusive(|mut timer, now| {
            let healed = self.policy.validate(Some(&mut timer), now)?;
            if healed {
                self.repository.save(timer.clone())?;
            }
            Ok(TimerSnapshot::capture(&timer, now))
        })
    }

    /// Start the timer for `seconds`
    pub fn start(&self, seconds: i64) -> Result<TimerSnapshot, TimerError> {
        let duration = Self::checked_duration(seconds)?;

        self.exclusive(|mut timer, now| {
            if !self.policy.can_start(&timer, Some(duration)) {
                return Err(match timer.status() {
                    TimerStatus::Running => TimerError::AlreadyRunning,
                    _ if duration.is_zero() => TimerError::DurationTooShort(seconds),
                    _ => TimerError::DurationTooLong { seconds, max: MAX_DURATION.as_secs() },
                });
            }

            timer.start(duration, now)?;
            self.repository.save(timer.clone())?;
            info!("Timer {} started for {}", timer.id(), duration);
            Ok(TimerSnapshot::capture(&timer, now))
        })
    }

    pub fn pause(&self) -> Result<TimerSnapshot, TimerError> {
        self.exclusive(|mut timer, now| {
            if !self.policy.can_pause(&timer) {
                return Err(TimerError::NotRunning);
            }

            timer.pause(now)?;
            self.repository.save(timer.clone())?;
            info!("Timer {} paused with {} remaining", timer.id(), timer.remaining_at_pause());
            Ok(TimerSnapshot::capture(&timer, now))
        })
    }

    pub fn resume(&self) -> Result<TimerSnapshot, TimerError> {
        self.exclusive(|mut timer, now| {
            if !self.policy.can_resume(&timer) {
                return Err(TimerError::CannotResume);
            }

            timer.resume(now)?;
            self.repository.save(timer.clone())?;
            info!("Timer {} resumed with {} remaining", timer.id(), timer.configured_duration());
            Ok(TimerSnapshot::capture(&timer, now))
        })
    }

    /// Reset the timer. Only a repository failure can make this fail.
    pub fn reset(&self) -> Result<TimerSnapshot, TimerError> {
        self.exclusive(|mut timer, now| {
            timer.reset();
            self.repository.save(timer.clone())?;
            info!("Timer {} reset", timer.id());
            Ok(TimerSnapshot::capture(&timer, now))
        })
    }

    // Range check applied before any state is loaded
    fn checked_duration(seconds: i64) -> Result<Duration, TimerError> {
        if seconds <= 0 {
            return Err(TimerError::DurationTooShort(seconds));
        }
        let duration = Duration::new(seconds)?;
        if duration > MAX_DURATION {
            return Err(TimerError::DurationTooLong { seconds, max: MAX_DURATION.as_secs() });
        }
        Ok(duration)
    }

    fn exclusive<F>(&self, op: F) -> Result<TimerSnapshot, TimerError>
    where
        F: FnOnce(Timer, DateTime<Utc>) -> Result<TimerSnapshot, TimerError>,
    {
        let _guard = self.guard.lock()
            .map_err(|e| TimerError::Repository(format!("Failed to lock timer service: {}", e)))?;

        let timer = self.get_or_create()?;
        op(timer, self.clock.now())
    }

    fn get_or_create(&self) -> Result<Timer, TimerError> {
        if let Some(timer) = self.repository.find_by_id(&self.timer_id)? {
            return Ok(timer);
        }

        debug!("Creating timer {}", self.timer_id);
        let timer = Timer::new(self.timer_id.clone());
        self.repository.save(timer.clone())?;
        Ok(timer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InMemoryTimerRepository, ManualClock};
    use chrono::TimeZone;

    struct Fixture {
        service: TimerService,
        clock: Arc<ManualClock>,
        repository: Arc<InMemoryTimerRepository>,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()));
        let repository = Arc::new(InMemoryTimerRepository::new());
        let service = TimerService::new(
            repository.clone(),
            clock.clone(),
            TimerId::new("default-timer").unwrap(),
        );
        Fixture { service, clock, repository }
    }

    #[test]
    fn first_read_creates_a_stopped_timer() {
        let f = fixture();
        let snapshot = f.service.current_state().unwrap();

        assert!(!snapshot.running);
        assert_eq!(snapshot.started_at_epoch_seconds, 0);
        assert_eq!(snapshot.current_remaining_seconds, 0);
        assert!(f.repository.find_by_id(f.service.timer_id()).unwrap().is_some());
    }

    #[test]
    fn start_reports_running_snapshot() {
        let f = fixture();
        let snapshot = f.service.start(300).unwrap();

        assert!(snapshot.running);
        assert_eq!(snapshot.started_at_epoch_seconds, f.clock.now().timestamp());
        assert_eq!(snapshot.configured_duration_seconds, 300);
        assert_eq!(snapshot.remaining_at_transition_seconds, 300);
        assert_eq!(snapshot.current_remaining_seconds, 300);
    }

    #[test]
    fn rejected_start_preserves_state() {
        let f = fixture();
        f.service.start(300).unwrap();

        assert_eq!(f.service.start(600), Err(TimerError::AlreadyRunning));
        assert_eq!(f.service.current_state().unwrap().configured_duration_seconds, 300);
    }

    #[test]
    fn out_of_range_durations_are_rejected_before_loading() {
        let f = fixture();

        assert_eq!(f.service.start(0), Err(TimerError::DurationTooShort(0)));
        assert_eq!(f.service.start(-5), Err(TimerError::DurationTooShort(-5)));
        assert_eq!(
            f.service.start(86401),
            Err(TimerError::DurationTooLong { seconds: 86401, max: 86400 })
        );
        assert!(f.repository.find_active().unwrap().is_none());

        assert!(f.service.start(86400).is_ok());
    }

    #[test]
    fn pause_resume_round_trip() {
        let f = fixture();
        f.service.start(120).unwrap();
        f.clock.advance_secs(45);

        let paused = f.service.pause().unwrap();
        assert!(!paused.running);
        assert_eq!(paused.remaining_at_transition_seconds, 75);
        assert_eq!(paused.current_remaining_seconds, 75);

        f.clock.advance_secs(600);
        let resumed = f.service.resume().unwrap();
        assert!(resumed.running);
        assert_eq!(resumed.configured_duration_seconds, 75);
        assert_eq!(resumed.current_remaining_seconds, 75);

        f.clock.advance_secs(5);
        assert_eq!(f.service.current_state().unwrap().current_remaining_seconds, 70);
    }

    #[test]
    fn transitions_from_wrong_state_fail() {
        let f = fixture();

        assert_eq!(f.service.pause(), Err(TimerError::NotRunning));
        assert_eq!(f.service.resume(), Err(TimerError::CannotResume));

        f.service.start(10).unwrap();
        assert_eq!(f.service.resume(), Err(TimerError::CannotResume));
    }

    #[test]
    fn reading_a_finished_timer_resets_it() {
        let f = fixture();
        f.service.start(1).unwrap();
        f.clock.advance_secs(2);

        let snapshot = f.service.current_state().unwrap();
        assert!(!snapshot.running);
        assert_eq!(snapshot.configured_duration_seconds, 0);
        assert_eq!(snapshot.current_remaining_seconds, 0);

        let stored = f.repository.find_by_id(f.service.timer_id()).unwrap().unwrap();
        assert_eq!(stored.status(), TimerStatus::Stopped);
    }

    #[test]
    fn pause_after_expiry_blocks_resume() {
        let f = fixture();
        f.service.start(1).unwrap();
        f.clock.advance_secs(2);

        let paused = f.service.pause().unwrap();
        assert_eq!(paused.remaining_at_transition_seconds, 0);
        assert_eq!(f.service.resume(), Err(TimerError::CannotResume));
    }

    #[test]
    fn reset_twice_yields_same_snapshot() {
        let f = fixture();
        f.service.start(100).unwrap();
        f.clock.advance_secs(10);

        let first = f.service.reset().unwrap();
        let second = f.service.reset().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            TimerSnapshot {
                running: false,
                started_at_epoch_seconds: 0,
                configured_duration_seconds: 0,
                remaining_at_transition_seconds: 0,
                current_remaining_seconds: 0,
            }
        );
    }

    #[test]
    fn concurrent_starts_admit_exactly_one() {
        let f = Arc::new(fixture());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let f = Arc::clone(&f);
                std::thread::spawn(move || f.service.start(100 + i))
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Result::is_ok)
            .count();
        assert_eq!(successes, 1);
    }
}
