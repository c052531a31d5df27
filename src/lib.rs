pub mod api;
pub mod assistant;
pub mod config;
pub mod core_state;
pub mod directory;
pub mod lab_catalog;
pub mod models;
pub mod scheduling;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Start the HTTP service and serve until Ctrl-C.
pub async fn run() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::ServerConfig::from_env().map_err(|e| e.to_string())?;
    tracing::info!(
        host = %settings.host,
        port = settings.port,
        booking_policy = ?settings.booking_policy,
        "Configuration loaded"
    );

    let core = Arc::new(core_state::CoreState::from_config(&settings));
    let mut server =
        api::start_api_server(core, SocketAddr::new(settings.host, settings.port)).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for shutdown signal: {e}"))?;

    server.shutdown();
    Ok(())
}
