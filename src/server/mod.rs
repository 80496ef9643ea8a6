//! Server module: router assembly, serve loop and the expiry sweeper

pub mod router;

pub use router::build_router;

use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::links::service::MagicLinkService;

/// Serve the application with graceful shutdown
///
/// Binds the listener, then runs until SIGTERM or Ctrl+C.
pub async fn serve(addr: &str, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Spawn the periodic sweep of expired records
///
/// Bounds memory growth from links that are never consumed and therefore
/// never hit the lazy eviction path. Disabled when `interval_secs` is zero;
/// see [`LinkConfig::sweep_interval_secs`](crate::config::LinkConfig).
pub fn spawn_sweeper(
    service: Arc<MagicLinkService>,
    interval_secs: u64,
) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
        // The first tick fires immediately; skip it so the sweep cadence
        // starts one interval after startup
        interval.tick().await;

        loop {
            interval.tick().await;
            if let Err(e) = service.purge_expired().await {
                tracing::warn!("Expiry sweep failed: {}", e);
            }
        }
    }))
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
