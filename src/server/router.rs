//! Router assembly for the HTTP surface

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::links::handlers::{AppState, consume_link, create_link, health_check, service_info};

/// Build the service router
///
/// Routes:
/// - `GET  /`                     → service identification
/// - `POST /mobile/link/create`   → issue a magic link
/// - `POST /mobile/link/consume`  → redeem a magic link
/// - `GET  /health`               → health check with store size
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/mobile/link/create", post(create_link))
        .route("/mobile/link/consume", post(consume_link))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
