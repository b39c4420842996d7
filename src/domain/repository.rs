//! Timer persistence contract and the in-memory store

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::debug;

use super::{Timer, TimerError, TimerId};

/// Storage for timers, keyed by id.
///
/// Each call must be linearizable with respect to the others.
pub trait TimerRepository: Send + Sync {
    fn find_by_id(&self, id: &TimerId) -> Result<Option<Timer>, TimerError>;

    fn save(&self, timer: Timer) -> Result<(), TimerError>;

    /// Any stored timer; the application only ever stores one
    fn find_active(&self) -> Result<Option<Timer>, TimerError>;

    fn delete(&self, id: &TimerId) -> Result<(), TimerError>;

    fn delete_all(&self) -> Result<(), TimerError>;
}

/// Process-local repository. Contents are lost on restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTimerRepository {
    timers: Arc<Mutex<HashMap<TimerId, Timer>>>,
}

impl InMemoryTimerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_timers<R>(&self, f: impl FnOnce(&mut HashMap<TimerId, Timer>) -> R) -> Result<R, TimerError> {
        let mut timers = self.timers.lock()
            .map_err(|e| TimerError::Repository(format!("Failed to lock timer store: {}", e)))?;
        Ok(f(&mut timers))
    }
}

impl TimerRepository for InMemoryTimerRepository {
    fn find_by_id(&self, id: &TimerId) -> Result<Option<Timer>, TimerError> {
        self.with_timers(|timers| timers.get(id).cloned())
    }

    fn save(&self, timer: Timer) -> Result<(), TimerError> {
        debug!("Saving timer {} ({:?})", timer.id(), timer.status());
        self.with_timers(|timers| {
            timers.insert(timer.id().clone(), timer);
        })
    }

    fn find_active(&self) -> Result<Option<Timer>, TimerError> {
        self.with_timers(|timers| timers.values().next().cloned())
    }

    fn delete(&self, id: &TimerId) -> Result<(), TimerError> {
        debug!("Deleting timer {}", id);
        self.with_timers(|timers| {
            timers.remove(id);
        })
    }

    fn delete_all(&self) -> Result<(), TimerError> {
        self.with_timers(|timers| timers.clear())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Duration, TimerStatus};
    use chrono::Utc;

    fn id(value: &str) -> TimerId {
        TimerId::new(value).unwrap()
    }

    #[test]
    fn save_then_find_returns_latest_version() {
        let repo = InMemoryTimerRepository::new();
        let mut timer = Timer::new(id("default-timer"));
        repo.save(timer.clone()).unwrap();

        timer.start(Duration::from_secs(30), Utc::now()).unwrap();
        repo.save(timer.clone()).unwrap();

        let found = repo.find_by_id(&id("default-timer")).unwrap().unwrap();
        assert_eq!(found.status(), TimerStatus::Running);
        assert_eq!(found, timer);
    }

    #[test]
    fn unknown_id_is_none() {
        let repo = InMemoryTimerRepository::new();
        repo.save(Timer::new(id("a"))).unwrap();

        assert_eq!(repo.find_by_id(&id("b")).unwrap(), None);
    }

    #[test]
    fn find_active_returns_the_stored_timer() {
        let repo = InMemoryTimerRepository::new();
        assert_eq!(repo.find_active().unwrap(), None);

        repo.save(Timer::new(id("only"))).unwrap();
        assert_eq!(repo.find_active().unwrap().map(|t| t.id().clone()), Some(id("only")));
    }

    #[test]
    fn delete_and_delete_all() {
        let repo = InMemoryTimerRepository::new();
        repo.save(Timer::new(id("a"))).unwrap();
        repo.save(Timer::new(id("b"))).unwrap();

        repo.delete(&id("a")).unwrap();
        assert_eq!(repo.find_by_id(&id("a")).unwrap(), None);
        assert!(repo.find_by_id(&id("b")).unwrap().is_some());

        repo.delete_all().unwrap();
        assert_eq!(repo.find_active().unwrap(), None);
    }

    #[test]
    fn clones_share_storage() {
        let repo = InMemoryTimerRepository::new();
        let other = repo.clone();
        repo.save(Timer::new(id("shared"))).unwrap();

        assert!(other.find_by_id(&id("shared")).unwrap().is_some());
    }
}
