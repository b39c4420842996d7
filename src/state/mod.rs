//! State management module
//!
//! This module holds the shared application state handed to HTTP handlers.

pub mod app_state;

// Re-export main types
pub use app_state::AppState;
