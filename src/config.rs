//! Configuration and CLI argument handling

use clap::Parser;

use crate::domain::{TimerError, TimerId};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "timer-server")]
#[command(about = "An HTTP server exposing a single start/pause/resume/reset timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Identifier of the timer this server manages
    #[arg(long, default_value = "default-timer")]
    pub timer_id: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// The configured timer identifier
    pub fn timer_id(&self) -> Result<TimerId, TimerError> {
        TimerId::new(self.timer_id.clone())
    }
}
