//! HTTP handlers for magic-link operations
//!
//! Thin glue between the transport and [`MagicLinkService`]: request DTOs,
//! presence validation and the failure-to-status mapping carried by
//! [`LinkError`](crate::core::LinkError).

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::core::{LinkError, LinkResult};
use crate::links::service::MagicLinkService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<MagicLinkService>,
}

/// Request body for creating a magic link
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub user_id: String,
    pub email: String,
}

/// Request body for consuming a magic link
#[derive(Debug, Deserialize)]
pub struct ConsumeLinkRequest {
    pub token: String,
}

/// Response for a created magic link
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    /// Deep-link URL the client application opens
    pub magic_link: String,

    /// The raw single-use token
    pub token: String,

    /// Seconds until the link expires
    pub expires_in: u64,
}

/// Response for a consumed magic link
#[derive(Debug, Serialize)]
pub struct ConsumeLinkResponse {
    /// The application credential, released exactly once
    pub app_token: String,

    /// The user the link was issued for
    pub user_id: String,
}

fn require_non_empty(value: &str, field: &'static str) -> LinkResult<()> {
    if value.trim().is_empty() {
        return Err(LinkError::InvalidRequest { field });
    }
    Ok(())
}

/// Create a magic link for passwordless authentication
///
/// POST /mobile/link/create
pub async fn create_link(
    State(state): State<AppState>,
    Json(request): Json<CreateLinkRequest>,
) -> Result<Json<CreateLinkResponse>, LinkError> {
    require_non_empty(&request.user_id, "user_id")?;
    require_non_empty(&request.email, "email")?;

    let created = state
        .link_service
        .create(&request.user_id, &request.email)
        .await?;

    Ok(Json(CreateLinkResponse {
        magic_link: created.magic_link,
        token: created.token,
        expires_in: created.expires_in,
    }))
}

/// Consume a magic link and return the application token
///
/// POST /mobile/link/consume
pub async fn consume_link(
    State(state): State<AppState>,
    Json(request): Json<ConsumeLinkRequest>,
) -> Result<Json<ConsumeLinkResponse>, LinkError> {
    require_non_empty(&request.token, "token")?;

    let consumed = state.link_service.consume(&request.token).await?;

    Ok(Json(ConsumeLinkResponse {
        app_token: consumed.app_token,
        user_id: consumed.user_id,
    }))
}

/// Health check endpoint
///
/// GET /health
///
/// `active_links` is the raw store size, counting expired entries that have
/// not been lazily evicted yet.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, LinkError> {
    let active_links = state.link_service.active_links().await?;

    Ok(Json(json!({
        "status": "healthy",
        "active_links": active_links
    })))
}

/// Service identification endpoint
///
/// GET /
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "service": "Link Service",
        "status": "running"
    }))
}
