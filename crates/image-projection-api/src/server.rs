use std::future::Future;

use anyhow::Result;

use crate::config::ServerConfig;
use crate::router;

/// Bind and serve until `shutdown` resolves.
pub async fn start_server(
    config: ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = config.socket_addr();
    let app = router::create_router(&config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        max_body_bytes = config.max_body_bytes,
        "Image projection server listening on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
