//! Application service module
//!
//! This module contains the timer use cases that sit between the HTTP layer
//! and the timer domain.

pub mod timer_service;

// Re-export main types
pub use timer_service::{TimerService, TimerSnapshot};
