//! Configuration for the bundled in-memory cache

use crate::error::{Result, SentenceError};

/// Default entry-count cap for the in-memory cache
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Configuration for [`InMemorySentenceCache`](crate::cache::InMemorySentenceCache)
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    ///
    /// When full, expired entries are swept first; if the cache is still
    /// full the earliest-expiring entry is evicted.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(SentenceError::Config(
                "max_entries must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    max_entries: Option<usize>,
}

impl CacheConfigBuilder {
    /// Set the maximum number of cache entries
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            max_entries: self.max_entries.unwrap_or(defaults.max_entries),
        }
    }
}
