//! Domain types for issued magic links

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A single issued magic link, keyed in the store by its `token`
///
/// The record is created unconsumed and transitions `consumed: false → true`
/// at most once. After `expires_at` it is no longer redeemable and is evicted
/// the first time a consume attempt finds it expired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Opaque single-use token embedded in the deep link (primary key)
    pub token: String,

    /// Longer-lived application credential, released to the caller exactly
    /// once upon successful consumption
    pub app_token: String,

    /// Caller-supplied user identifier, opaque to the service
    pub user_id: String,

    /// Caller-supplied email, not validated beyond presence
    pub email: String,

    /// Absolute expiry instant (creation time + TTL)
    pub expires_at: DateTime<Utc>,

    /// Whether the link has been redeemed (terminal once true)
    pub consumed: bool,
}

impl LinkRecord {
    /// Create a fresh unconsumed record expiring `ttl_secs` from `now`
    pub fn new(
        token: impl Into<String>,
        app_token: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
        ttl_secs: u64,
    ) -> Self {
        Self {
            token: token.into(),
            app_token: app_token.into(),
            user_id: user_id.into(),
            email: email.into(),
            expires_at: now + Duration::seconds(ttl_secs as i64),
            consumed: false,
        }
    }

    /// Whether the record is past its expiry at `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whole seconds remaining before expiry at `now` (zero if already past)
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }
}

/// Result of a successful Create: everything the caller needs to hand the
/// link to a client application
#[derive(Debug, Clone, Serialize)]
pub struct CreatedLink {
    /// Deep-link URL of the form `<scheme>://link/consume?token=<token>`
    pub magic_link: String,

    /// The raw single-use token (also embedded in `magic_link`)
    pub token: String,

    /// TTL in whole seconds
    pub expires_in: u64,
}

/// Result of a successful Consume: the credential release
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConsumedLink {
    /// The application token generated at creation time (never regenerated)
    pub app_token: String,

    /// The user identifier the link was issued for
    pub user_id: String,
}
