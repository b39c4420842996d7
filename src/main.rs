//! Timer Server - An HTTP server exposing a single start/pause/resume/reset timer
//!
//! This is the main entry point for the timer-server application.

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use timer_server::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("timer_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting timer-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, timer_id={}",
          config.host, config.port, config.timer_id);

    let timer_id = config.timer_id()?;

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer_id));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /api/timer                       - Current timer state");
    info!("  POST /api/timer/start?durationSeconds - Start the timer");
    info!("  POST /api/timer/pause                 - Pause the timer");
    info!("  POST /api/timer/resume                - Resume the timer");
    info!("  POST /api/timer/reset                 - Reset the timer");
    info!("  GET  /status                          - Server status and timer");
    info!("  GET  /health                          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>());

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
