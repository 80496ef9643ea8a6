//! Storage backends for the link store

pub mod in_memory;

pub use in_memory::InMemoryLinkStore;

use async_trait::async_trait;

use crate::core::{ConsumedLink, LinkRecord, LinkResult};

/// Token → [`LinkRecord`] store enforcing the create/consume/expire protocol
///
/// Implementations must make `consume` atomic per token: the full
/// check-then-act sequence (present? consumed? expired? mark consumed)
/// executes as one critical section, so that of two concurrent consume calls
/// on the same token exactly one succeeds and the other observes
/// `AlreadyUsed`.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a freshly issued record, keyed by its token
    async fn insert(&self, record: LinkRecord) -> LinkResult<()>;

    /// Redeem a token: exactly-once credential release
    ///
    /// Check order is part of the contract: absent → `NotFound`; consumed →
    /// `AlreadyUsed` (record unchanged); past expiry → evict, then `Expired`;
    /// otherwise mark consumed and return the record's credential. The
    /// consumed check precedes the expiry check so a consumed record reports
    /// `AlreadyUsed` even at the expiry boundary.
    async fn consume(&self, token: &str) -> LinkResult<ConsumedLink>;

    /// Number of records currently held, including expired-but-unevicted ones
    async fn count(&self) -> LinkResult<usize>;

    /// Remove every record past its expiry, returning how many were evicted
    async fn purge_expired(&self) -> LinkResult<usize>;
}
