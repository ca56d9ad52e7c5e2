//! Sessions - a dial countdown timer
//!
//! This is the main entry point for the sessions server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use sessions::{
    api::create_router,
    config::Config,
    services::JsonSettings,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("sessions={},tower_http=info", config.log_level()))
        .init();

    info!("Starting sessions server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, settings={}, dial={}px",
          config.host, config.port, config.settings.display(), config.dial_size);

    // Spawn the dial loop, which owns the timer, and the notifier
    let state = Arc::new(AppState::launch(
        config.port,
        config.host.clone(),
        JsonSettings::new(&config.settings),
        config.dial_bounds(),
        config.render_options(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /dial/press, /dial/drag/begin, /dial/drag/update  {{\"x\", \"y\"}}");
    info!("  POST /dial/drag/end  - Finish a drag, resuming or starting the timer");
    info!("  POST /dial/set       - Click at a point");
    info!("  POST /toggle         - Start or stop the timer");
    info!("  POST /time/add       - Add 30 seconds");
    info!("  POST /time/remove    - Remove 30 seconds");
    info!("  POST /alarm/stop     - Silence the alarm");
    info!("  GET  /status         - Dial state and server info");
    info!("  GET  /render         - Drawing primitives");
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
