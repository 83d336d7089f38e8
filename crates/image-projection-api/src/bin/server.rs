//! Server binary: reads configuration from the environment and serves
//! until Ctrl+C.

use tracing_subscriber::EnvFilter;

use image_projection_api::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        "Starting image projection service v{}",
        image_projection_api::version()
    );

    let config = ServerConfig::from_env();
    start_server(config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutting down...");
    })
    .await
}
