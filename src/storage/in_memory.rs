//! In-memory implementation of LinkStore
//!
//! The only backend: records live in a process-local map and are lost on
//! restart. Uses RwLock for thread-safe access; `consume` holds the write
//! lock across its whole check-then-act sequence, which is what guarantees
//! single-use under concurrent redemption attempts.

use crate::core::{ConsumedLink, LinkError, LinkRecord, LinkResult};
use crate::storage::LinkStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory link store implementation
#[derive(Clone)]
pub struct InMemoryLinkStore {
    links: Arc<RwLock<HashMap<String, LinkRecord>>>,
}

impl InMemoryLinkStore {
    /// Create a new in-memory link store
    pub fn new() -> Self {
        Self {
            links: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryLinkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert(&self, record: LinkRecord) -> LinkResult<()> {
        let mut links = self
            .links
            .write()
            .map_err(|e| LinkError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        links.insert(record.token.clone(), record);

        Ok(())
    }

    async fn consume(&self, token: &str) -> LinkResult<ConsumedLink> {
        // Single critical section: lookup, state checks and the consumed-flag
        // write all happen under one write lock, so two racing consumers of
        // the same token serialize and only one can win.
        let mut links = self
            .links
            .write()
            .map_err(|e| LinkError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        let record = links.get(token).ok_or(LinkError::NotFound)?;

        if record.consumed {
            return Err(LinkError::AlreadyUsed);
        }

        if record.is_expired(Utc::now()) {
            links.remove(token);
            return Err(LinkError::Expired);
        }

        let record = links
            .get_mut(token)
            .ok_or_else(|| LinkError::Internal("record vanished under write lock".to_string()))?;
        record.consumed = true;

        Ok(ConsumedLink {
            app_token: record.app_token.clone(),
            user_id: record.user_id.clone(),
        })
    }

    async fn count(&self) -> LinkResult<usize> {
        let links = self
            .links
            .read()
            .map_err(|e| LinkError::Internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(links.len())
    }

    async fn purge_expired(&self) -> LinkResult<usize> {
        let mut links = self
            .links
            .write()
            .map_err(|e| LinkError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        let now = Utc::now();
        let before = links.len();
        links.retain(|_, record| !record.is_expired(now));

        Ok(before - links.len())
    }
}
