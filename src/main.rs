//! Link service binary: tracing init, config load, store wiring, serve

use anyhow::Result;
use link_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "link_service=info,tower_http=info".into()),
        )
        .init();

    // Config file path from argv, else LINK_SERVICE_CONFIG, else defaults;
    // environment variables override either way
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LINK_SERVICE_CONFIG").ok())
    {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path);
            ServiceConfig::from_yaml_file(&path)?
        }
        None => ServiceConfig::default(),
    }
    .apply_env()?;

    let store = Arc::new(InMemoryLinkStore::new());
    let service = Arc::new(MagicLinkService::new(store, config.link.clone()));

    if spawn_sweeper(service.clone(), config.link.sweep_interval_secs).is_some() {
        tracing::info!(
            interval_secs = config.link.sweep_interval_secs,
            "Expiry sweeper enabled"
        );
    }

    let app = build_router(AppState {
        link_service: service,
    });

    serve(&config.bind_addr(), app).await
}
