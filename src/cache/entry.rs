//! Cache entry management with TTL support

use chrono::{DateTime, Utc};
use std::time::Duration;

/// A cache entry holding an encoded DTO and its expiration instant
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The encoded transfer-shaped value
    pub encoded: String,

    /// When the entry expires
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Create a new cache entry expiring `ttl` from now
    pub fn new(encoded: String, ttl: Duration) -> Self {
        let expires_at =
            Utc::now() + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(3600));

        Self {
            encoded,
            expires_at,
        }
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Get time until expiration, `None` once expired
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now();
        if now > self.expires_at {
            None
        } else {
            (self.expires_at - now).to_std().ok()
        }
    }
}
