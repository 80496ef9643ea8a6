//! Service-level tests of the magic-link lifecycle
//!
//! These exercise the MagicLinkService over the in-memory store directly,
//! without the HTTP layer: single-use enforcement, expiry eviction, token
//! uniqueness and the concurrent-redemption race.

use chrono::{Duration, Utc};
use link_service::prelude::*;
use std::collections::HashSet;

fn test_service() -> (Arc<InMemoryLinkStore>, MagicLinkService) {
    let store = Arc::new(InMemoryLinkStore::new());
    let service = MagicLinkService::new(store.clone(), LinkConfig::default());
    (store, service)
}

/// Insert a record that is already past its expiry, bypassing the service
/// so tests never have to sleep through a real TTL
async fn insert_expired(store: &InMemoryLinkStore, token: &str) {
    let mut record = LinkRecord::new(token, "stale-app-token", "u1", "e@x.com", Utc::now(), 600);
    record.expires_at = Utc::now() - Duration::seconds(1);
    store.insert(record).await.unwrap();
}

// =============================================================================
// Single-use & round-trip
// =============================================================================

mod consumption_tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_releases_original_app_token() {
        let (store, service) = test_service();

        // Plant a record with a known app token so the release can be
        // compared byte-for-byte: it must come back verbatim, never
        // regenerated at consume time
        let record = LinkRecord::new("tok1", "known-app-token", "u1", "e@x.com", Utc::now(), 600);
        store.insert(record).await.unwrap();

        let consumed = service.consume("tok1").await.unwrap();

        assert_eq!(consumed.app_token, "known-app-token");
        assert_eq!(consumed.user_id, "u1");
    }

    #[tokio::test]
    async fn generated_app_token_carries_full_entropy() {
        let (_, service) = test_service();

        let created = service.create("u1", "e@x.com").await.unwrap();
        let consumed = service.consume(&created.token).await.unwrap();

        // 48 bytes of entropy → 64 unpadded URL-safe base64 chars
        assert_eq!(consumed.app_token.len(), 64);
        assert_ne!(consumed.app_token, created.token);
    }

    #[tokio::test]
    async fn consume_returns_issuing_user() {
        let (_, service) = test_service();

        let created = service.create("42", "a@b.com").await.unwrap();
        let consumed = service.consume(&created.token).await.unwrap();

        assert_eq!(consumed.user_id, "42");
    }

    #[tokio::test]
    async fn second_consume_fails_already_used() {
        let (_, service) = test_service();
        let created = service.create("u1", "e@x.com").await.unwrap();

        let first = service.consume(&created.token).await;
        assert!(first.is_ok());

        // Every subsequent attempt is AlreadyUsed, never a second success
        for _ in 0..3 {
            let err = service.consume(&created.token).await.unwrap_err();
            assert_eq!(err, LinkError::AlreadyUsed);
        }
    }

    #[tokio::test]
    async fn unknown_token_fails_not_found() {
        let (_, service) = test_service();

        let err = service.consume("never-issued").await.unwrap_err();
        assert_eq!(err, LinkError::NotFound);
    }
}

// =============================================================================
// Expiry
// =============================================================================

mod expiry_tests {
    use super::*;

    #[tokio::test]
    async fn expired_token_fails_and_is_evicted() {
        let (store, service) = test_service();
        insert_expired(&store, "stale").await;

        let err = service.consume("stale").await.unwrap_err();
        assert_eq!(err, LinkError::Expired);

        // Eviction is a side effect of detection: the next attempt sees an
        // absent record, never Expired twice
        let err = service.consume("stale").await.unwrap_err();
        assert_eq!(err, LinkError::NotFound);
        assert_eq!(service.active_links().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unconsumed_expired_records_accumulate_until_purged() {
        let (store, service) = test_service();
        insert_expired(&store, "stale-1").await;
        insert_expired(&store, "stale-2").await;
        service.create("u1", "e@x.com").await.unwrap();

        // Lazy eviction: nothing looked them up, so they still count
        assert_eq!(service.active_links().await.unwrap(), 3);

        let evicted = service.purge_expired().await.unwrap();
        assert_eq!(evicted, 2);
        assert_eq!(service.active_links().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn fresh_link_is_redeemable_within_ttl() {
        let (_, service) = test_service();

        let created = service.create("u1", "e@x.com").await.unwrap();
        assert_eq!(created.expires_in, 600);

        assert!(service.consume(&created.token).await.is_ok());
    }
}

// =============================================================================
// Uniqueness
// =============================================================================

mod uniqueness_tests {
    use super::*;

    #[tokio::test]
    async fn tokens_and_app_tokens_are_pairwise_distinct() {
        let (store, service) = test_service();

        let mut tokens = HashSet::new();
        for _ in 0..1000 {
            let created = service.create("u1", "e@x.com").await.unwrap();
            assert!(tokens.insert(created.token), "token collision");
        }

        // Redeem everything and check the app tokens too
        let mut app_tokens = HashSet::new();
        for token in &tokens {
            let consumed = store.consume(token).await.unwrap();
            assert!(app_tokens.insert(consumed.app_token), "app token collision");
        }

        assert_eq!(tokens.len(), 1000);
        assert_eq!(app_tokens.len(), 1000);
    }
}

// =============================================================================
// Concurrency
// =============================================================================

mod race_tests {
    use super::*;
    use tokio::sync::Barrier;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn simultaneous_consume_has_exactly_one_winner() {
        let (_, service) = test_service();
        let service = Arc::new(service);
        let created = service.create("u1", "e@x.com").await.unwrap();

        let barrier = Arc::new(Barrier::new(2));
        let mut handles = Vec::new();
        for _ in 0..2 {
            let service = service.clone();
            let token = created.token.clone();
            let barrier = barrier.clone();
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                service.consume(&token).await
            }));
        }

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }

        let successes = outcomes.iter().filter(|o| o.is_ok()).count();
        let rejected = outcomes
            .iter()
            .filter(|o| matches!(o, Err(LinkError::AlreadyUsed)))
            .count();

        assert_eq!(successes, 1, "exactly one consume must win");
        assert_eq!(rejected, 1, "the loser must observe AlreadyUsed");
    }
}
