//! Typed error handling for the link service
//!
//! This module provides the error taxonomy for magic-link operations so that
//! clients can handle failures specifically rather than dealing with generic
//! `anyhow::Error` types.
//!
//! # Error Categories
//!
//! - [`LinkError::NotFound`]: token unknown or already evicted
//! - [`LinkError::AlreadyUsed`]: valid token, already consumed
//! - [`LinkError::Expired`]: valid token, TTL elapsed (record evicted on detection)
//! - [`LinkError::InvalidRequest`]: a required request field was missing or empty
//! - [`LinkError::Internal`]: infrastructure failure (should not happen in normal operation)
//!
//! # Example
//!
//! ```rust,ignore
//! use link_service::prelude::*;
//!
//! match service.consume(&token).await {
//!     Ok(consumed) => println!("app token: {}", consumed.app_token),
//!     Err(LinkError::AlreadyUsed) => println!("link already redeemed"),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Result alias for link operations
pub type LinkResult<T> = Result<T, LinkError>;

/// The main error type for magic-link operations
///
/// The three consumption failures (`NotFound`, `AlreadyUsed`, `Expired`) are
/// terminal from the caller's perspective: none is retriable, the caller must
/// request a brand-new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// Token unknown: never issued, or already evicted after expiry
    NotFound,

    /// Token valid but already consumed (terminal state, idempotently rejected)
    AlreadyUsed,

    /// Token valid but past its expiry; the record was evicted on detection
    Expired,

    /// A request field was missing or empty
    InvalidRequest { field: &'static str },

    /// Internal service errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::NotFound => write!(f, "Invalid or expired link"),
            LinkError::AlreadyUsed => write!(f, "Link already used"),
            LinkError::Expired => write!(f, "Link expired"),
            LinkError::InvalidRequest { field } => {
                write!(f, "Field '{}' must be a non-empty string", field)
            }
            LinkError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for LinkError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LinkError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LinkError::NotFound => StatusCode::NOT_FOUND,
            LinkError::AlreadyUsed => StatusCode::BAD_REQUEST,
            LinkError::Expired => StatusCode::GONE,
            LinkError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            LinkError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LinkError::NotFound => "LINK_NOT_FOUND",
            LinkError::AlreadyUsed => "LINK_ALREADY_USED",
            LinkError::Expired => "LINK_EXPIRED",
            LinkError::InvalidRequest { .. } => "INVALID_REQUEST",
            LinkError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            LinkError::InvalidRequest { field } => Some(serde_json::json!({ "field": field })),
            _ => None,
        }
    }
}

impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
