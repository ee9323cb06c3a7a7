//! Speech Timer - a practice timer server for timed speeches
//!
//! This is the main entry point for the speech-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use speech_timer::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::spawn_ticker,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("speech_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting speech-timer server v{}", env!("CARGO_PKG_VERSION"));

    // A bad timer configuration must never reach a running session
    let timer_config = match config.timer_config() {
        Ok(timer_config) => timer_config,
        Err(e) => {
            tracing::error!("Invalid timer configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Configuration: host={}, port={}, green={}s, yellow={}s, red={}s, total={}s",
        config.host,
        config.port,
        timer_config.green_time,
        timer_config.yellow_time,
        timer_config.red_time,
        timer_config.total_time
    );

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer_config)?);

    // Start the ticker background task
    spawn_ticker(Arc::clone(&state));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start    - Start or resume the timer");
    info!("  POST /timer/pause    - Pause the timer");
    info!("  POST /timer/reset    - Reset (optional JSON config body)");
    info!("  POST /timer/signal   - Force a signal: {{\"signal\": \"red\"}}");
    info!("  POST /timer/dismiss  - Hide the visible card");
    info!("  POST /timer/stop     - End the session and record it");
    info!("  GET  /timer/state    - Current timer state");
    info!("  GET  /timer/stream   - Server-sent state updates");
    info!("  GET  /session-summary - Last session record");
    info!("  GET  /status         - Server status");
    info!("  GET  /health         - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

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
