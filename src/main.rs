use reco_service::api::{create_router, AppState};
use reco_service::config::Config;
use reco_service::logging;
use reco_service::services::ProviderRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(config.log_json);

    tracing::info!(?config, "Starting recommendation service");

    let registry = ProviderRegistry::from_config(&config).await?;
    let state = AppState::new(config.server_config(), registry);

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received shutdown signal, draining connections");
}
