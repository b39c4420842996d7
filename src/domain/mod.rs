//! Timer domain module
//!
//! This module contains the timer entity, its duration value, the transition
//! policy, and the contracts for time and persistence.

pub mod clock;
pub mod duration;
pub mod error;
pub mod policy;
pub mod repository;
pub mod timer;

// Re-export main types
pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::Duration;
pub use error::TimerError;
pub use policy::{TimerPolicy, MAX_DURATION};
pub use repository::{InMemoryTimerRepository, TimerRepository};
pub use timer::{Timer, TimerId, TimerStatus};
