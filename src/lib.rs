//! Timer Server - An HTTP server exposing a single start/pause/resume/reset timer
//!
//! The timer's remaining time is computed on demand from the wall clock; no
//! background task drives it. A finished timer resets itself the next time
//! its state is read.

pub mod config;
pub mod domain;
pub mod state;
pub mod api;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
