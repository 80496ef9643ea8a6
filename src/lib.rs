//! # Gearted Link Service
//!
//! Issues and redeems short-lived single-use "magic link" tokens for
//! passwordless mobile authentication.
//!
//! ## Flow
//!
//! - A client requests a link for a user/email pair and receives a deep-link
//!   URL (`gearted://link/consume?token=<token>`) embedding a random
//!   single-use token; the service separately holds a longer-lived
//!   application token.
//! - A second call exchanges the token for the application token exactly
//!   once, within the TTL window (600 seconds by default).
//! - A token can fail redemption three ways, all terminal: never issued or
//!   already evicted (`NotFound`), already redeemed (`AlreadyUsed`), or past
//!   its TTL (`Expired`, evicting the record as a side effect).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use link_service::prelude::*;
//!
//! let store = Arc::new(InMemoryLinkStore::new());
//! let service = MagicLinkService::new(store, LinkConfig::default());
//!
//! let created = service.create("user-42", "user@example.com").await?;
//! // hand created.magic_link to the client...
//!
//! let consumed = service.consume(&created.token).await?;
//! assert_eq!(consumed.user_id, "user-42");
//! ```
//!
//! Records live in a process-local map: restart loses all outstanding links,
//! by design.

pub mod config;
pub mod core;
pub mod links;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ConsumedLink, CreatedLink, ErrorResponse, LinkError, LinkRecord, LinkResult,
        generate_token,
    };

    // === Service & Handlers ===
    pub use crate::links::{AppState, MagicLinkService};

    // === Storage ===
    pub use crate::storage::{InMemoryLinkStore, LinkStore};

    // === Config ===
    pub use crate::config::{LinkConfig, ServiceConfig};

    // === Server ===
    pub use crate::server::{build_router, serve, spawn_sweeper};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
