use std::sync::Arc;

use anyhow::Result;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::container::Container;
use super::controller::ChatController;

pub fn build_router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/api/chat", post(ChatController::chat))
        .with_state(container)
}

/// Serve the relay on `listener` until Ctrl+C.
pub async fn serve(listener: TcpListener, container: Arc<Container>) -> Result<()> {
    info!(
        "Relay listening on http://{} (provider={}, model={})",
        listener.local_addr()?,
        container.provider_name(),
        container.model().model
    );

    axum::serve(listener, build_router(container))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down relay");
        })
        .await?;

    Ok(())
}
