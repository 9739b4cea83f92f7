use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::domain::DomainError;

use super::{build_router, Container};

/// Bind the proxy and serve until Ctrl+C.
pub async fn serve(container: Container) -> Result<(), DomainError> {
    let app = build_router(container.upstream());

    let listener = TcpListener::bind(container.bind_addr()).await?;
    info!("App listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
