//! Magic-link issuance and redemption over an injected store

use chrono::Utc;
use std::sync::Arc;

use crate::config::LinkConfig;
use crate::core::{ConsumedLink, CreatedLink, LinkRecord, LinkResult, generate_token};
use crate::storage::LinkStore;

/// The magic-link service
///
/// Owns token generation, TTL arithmetic and deep-link assembly; delegates
/// record lifecycle (single-use enforcement, expiry eviction) to the store.
/// Constructed once at startup and shared by handle.
#[derive(Clone)]
pub struct MagicLinkService {
    store: Arc<dyn LinkStore>,
    config: LinkConfig,
}

impl MagicLinkService {
    /// Create a service over the given store
    pub fn new(store: Arc<dyn LinkStore>, config: LinkConfig) -> Self {
        Self { store, config }
    }

    /// Issue a new magic link for a user/email pair
    ///
    /// Always succeeds (barring infrastructure failure): generates the
    /// single-use token and the application token, stores the record with
    /// `expires_at = now + ttl`, and returns the deep-link URL.
    pub async fn create(&self, user_id: &str, email: &str) -> LinkResult<CreatedLink> {
        let token = generate_token(self.config.token_bytes)?;
        let app_token = generate_token(self.config.app_token_bytes)?;

        let record = LinkRecord::new(
            token.clone(),
            app_token,
            user_id,
            email,
            Utc::now(),
            self.config.ttl_secs,
        );
        self.store.insert(record).await?;

        let magic_link = format!("{}://link/consume?token={}", self.config.scheme, token);

        tracing::info!(user_id = %user_id, expires_in = self.config.ttl_secs, "Issued magic link");

        Ok(CreatedLink {
            magic_link,
            token,
            expires_in: self.config.ttl_secs,
        })
    }

    /// Redeem a token for the application credential, exactly once
    pub async fn consume(&self, token: &str) -> LinkResult<ConsumedLink> {
        let consumed = self.store.consume(token).await.inspect_err(|e| {
            tracing::info!(outcome = e.error_code(), "Magic link consumption rejected");
        })?;

        tracing::info!(user_id = %consumed.user_id, "Magic link consumed");

        Ok(consumed)
    }

    /// Number of records in the store, including expired-but-unevicted ones
    ///
    /// Advisory only, surfaced by the health endpoint.
    pub async fn active_links(&self) -> LinkResult<usize> {
        self.store.count().await
    }

    /// Evict every record past its expiry, returning how many were removed
    pub async fn purge_expired(&self) -> LinkResult<usize> {
        let evicted = self.store.purge_expired().await?;
        if evicted > 0 {
            tracing::debug!(evicted, "Swept expired magic links");
        }
        Ok(evicted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LinkError;
    use crate::storage::InMemoryLinkStore;

    fn test_service() -> MagicLinkService {
        MagicLinkService::new(Arc::new(InMemoryLinkStore::new()), LinkConfig::default())
    }

    #[tokio::test]
    async fn test_create_returns_deep_link_with_token() {
        let service = test_service();

        let created = service.create("42", "a@b.com").await.unwrap();

        assert_eq!(
            created.magic_link,
            format!("gearted://link/consume?token={}", created.token)
        );
        assert_eq!(created.expires_in, 600);
        assert_eq!(service.active_links().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_round_trip_returns_original_app_token() {
        let service = test_service();

        let created = service.create("u1", "e@x.com").await.unwrap();
        let consumed = service.consume(&created.token).await.unwrap();

        assert_eq!(consumed.user_id, "u1");
        // App token is released, not regenerated: it differs from the link
        // token and carries 48 bytes of entropy (64 base64 chars)
        assert_ne!(consumed.app_token, created.token);
        assert_eq!(consumed.app_token.len(), 64);
    }

    #[tokio::test]
    async fn test_consume_is_single_use() {
        let service = test_service();
        let created = service.create("u1", "e@x.com").await.unwrap();

        service.consume(&created.token).await.unwrap();

        let err = service.consume(&created.token).await.unwrap_err();
        assert_eq!(err, LinkError::AlreadyUsed);
    }

    #[tokio::test]
    async fn test_custom_scheme_and_ttl() {
        let config = LinkConfig {
            ttl_secs: 60,
            scheme: "example".to_string(),
            ..LinkConfig::default()
        };
        let service = MagicLinkService::new(Arc::new(InMemoryLinkStore::new()), config);

        let created = service.create("u1", "e@x.com").await.unwrap();

        assert!(created.magic_link.starts_with("example://link/consume?token="));
        assert_eq!(created.expires_in, 60);
    }
}
