//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::{
    domain::{Clock, InMemoryTimerRepository, SystemClock, TimerError, TimerId, TimerRepository},
    services::{TimerService, TimerSnapshot},
};

/// Shared state handed to every HTTP handler
pub struct AppState {
    /// The timer use cases
    pub timer: TimerService,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last successful action and when it happened
    pub last_action: Arc<Mutex<Option<(String, DateTime<Utc>)>>>,
}

impl AppState {
    /// Create an AppState backed by the in-memory repository and system clock
    pub fn new(port: u16, host: String, timer_id: TimerId) -> Self {
        Self::with_components(
            port,
            host,
            timer_id,
            Arc::new(InMemoryTimerRepository::new()),
            Arc::new(SystemClock),
        )
    }

    /// Create an AppState with an explicit repository and clock
    pub fn with_components(
        port: u16,
        host: String,
        timer_id: TimerId,
        repository: Arc<dyn TimerRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            timer: TimerService::new(repository, clock, timer_id),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
        }
    }

    /// Run a timer action and record it as the last action if it succeeded.
    ///
    /// The last-action lock is held across the action, so the recorded action
    /// is always the last transition the timer applied.
    pub fn perform<F>(&self, action: &str, op: F) -> Result<TimerSnapshot, TimerError>
    where
        F: FnOnce(&TimerService) -> Result<TimerSnapshot, TimerError>,
    {
        let mut last_action = self.last_action.lock()
            .map_err(|e| TimerError::Repository(format!("Failed to lock last action: {}", e)))?;

        let snapshot = op(&self.timer)?;
        *last_action = Some((action.to_string(), Utc::now()));
        Ok(snapshot)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock() {
            Ok(last) => last.clone().unzip(),
            Err(e) => {
                warn!("Failed to read last action: {}", e);
                (None, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManualClock;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::with_components(
            8080,
            "127.0.0.1".to_string(),
            TimerId::new("default-timer").unwrap(),
            Arc::new(InMemoryTimerRepository::new()),
            Arc::new(ManualClock::default()),
        ))
    }

    #[test]
    fn rejected_actions_are_not_recorded() {
        let state = state();
        assert_eq!(state.get_last_action(), (None, None));

        state.perform("start", |timer| timer.start(60)).unwrap();
        assert!(state.perform("resume", |timer| timer.resume()).is_err());

        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start"));
        assert!(time.is_some());
    }

    #[test]
    fn last_action_matches_last_applied_transition() {
        let state = state();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let state = Arc::clone(&state);
                std::thread::spawn(move || {
                    for _ in 0..20 {
                        if i % 2 == 0 {
                            let _ = state.perform("start", |timer| timer.start(600));
                        } else {
                            let _ = state.perform("reset", |timer| timer.reset());
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let (action, _) = state.get_last_action();
        let running = state.timer.current_state().unwrap().running;
        match action.as_deref() {
            Some("start") => assert!(running),
            Some("reset") => assert!(!running),
            other => panic!("unexpected last action {:?}", other),
        }
    }
}
