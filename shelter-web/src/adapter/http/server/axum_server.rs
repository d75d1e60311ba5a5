//! axum server

use crate::adapter::http::routes;
use crate::config::{AppConfig, AppState};

pub async fn start_http_server(config: &AppConfig, state: AppState) -> std::io::Result<()> {
    let url = config.server.url();
    let listener = tokio::net::TcpListener::bind(&url).await?;
    tracing::info!("start server: {}", url);
    let shutdown = state.shutdown.clone();
    axum::serve(listener, routes(state))
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("listen for shutdown signal error: {e}");
            }
            tracing::info!("shutdown signal received");
            shutdown.cancel();
        })
        .await?;
    tracing::info!("end server");
    Ok(())
}
