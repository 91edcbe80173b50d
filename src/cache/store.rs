//! Cache store contract and the bundled in-memory implementation

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::config::CacheConfig;
use crate::cache::entry::CacheEntry;
use crate::cache::types::CacheStats;
use crate::domain::{SentenceDto, SentenceId};
use crate::error::Result;

/// Contract the key-value cache store must provide
///
/// Values cross this boundary through the DTO's explicit encode/decode
/// pair, so every implementation shares one stable serialization
/// contract. Callers treat any `Err` from these methods as a miss; an
/// implementation that can be unavailable (a remote cache, say) may
/// also choose to report all-absent itself.
#[async_trait]
pub trait SentenceCache: Send + Sync {
    /// Single-key read; absence and expiry are `Ok(None)`
    async fn get(&self, id: SentenceId) -> Result<Option<SentenceDto>>;

    /// Write one entry, expiring `ttl` from now
    async fn set(&self, id: SentenceId, dto: &SentenceDto, ttl: Duration) -> Result<()>;

    /// Batched read for an identifier list, one request total
    ///
    /// The returned pairs are positionally aligned with `ids`: the pair
    /// at index `i` is `(ids[i], hit-or-miss for ids[i])`.
    async fn multi_get(
        &self,
        ids: &[SentenceId],
    ) -> Result<Vec<(SentenceId, Option<SentenceDto>)>>;
}

/// Bounded in-memory cache with TTL expiration
///
/// Suitable for tests and single-process deployments; a production
/// deployment would put a shared cache store behind the same trait.
pub struct InMemorySentenceCache {
    config: CacheConfig,
    store: Arc<RwLock<CacheShard>>,
}

/// Internal cache storage
struct CacheShard {
    entries: HashMap<SentenceId, CacheEntry>,
    stats: CacheStats,
}

/// Outcome of probing the shard for one id
enum Probe {
    Absent,
    Expired,
    Corrupt,
    Hit(SentenceDto),
}

impl InMemorySentenceCache {
    /// Create a new cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        info!(max_entries = config.max_entries, "initializing in-memory sentence cache");

        let shard = CacheShard {
            entries: HashMap::new(),
            stats: CacheStats::default(),
        };

        Self {
            config,
            store: Arc::new(RwLock::new(shard)),
        }
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let shard = self.store.read().await;
        shard.stats.clone()
    }

    /// Get number of entries in cache
    pub async fn len(&self) -> usize {
        let shard = self.store.read().await;
        shard.entries.len()
    }

    /// Check if cache is empty
    pub async fn is_empty(&self) -> bool {
        let shard = self.store.read().await;
        shard.entries.is_empty()
    }

    /// Clear all entries
    pub async fn clear(&self) {
        let mut shard = self.store.write().await;
        shard.entries.clear();
        shard.stats.entries = 0;
    }

    /// Internal: resolve one id against the shard, updating stats
    ///
    /// Expired and undecodable entries are removed and read as misses.
    fn lookup(shard: &mut CacheShard, id: SentenceId) -> Option<SentenceDto> {
        let probe = match shard.entries.get(&id) {
            None => Probe::Absent,
            Some(entry) if entry.is_expired() => Probe::Expired,
            Some(entry) => match SentenceDto::from_cache_value(&entry.encoded) {
                Ok(dto) => Probe::Hit(dto),
                Err(_) => Probe::Corrupt,
            },
        };

        match probe {
            Probe::Hit(dto) => {
                shard.stats.hits += 1;
                debug!(sentence_id = id, "cache hit");
                Some(dto)
            }
            Probe::Absent => {
                shard.stats.misses += 1;
                debug!(sentence_id = id, "cache miss");
                None
            }
            Probe::Expired => {
                shard.entries.remove(&id);
                shard.stats.misses += 1;
                shard.stats.evictions_ttl += 1;
                shard.stats.entries = shard.entries.len();
                debug!(sentence_id = id, "cache entry expired");
                None
            }
            Probe::Corrupt => {
                shard.entries.remove(&id);
                shard.stats.misses += 1;
                shard.stats.entries = shard.entries.len();
                warn!(sentence_id = id, "dropping undecodable cache entry");
                None
            }
        }
    }

    /// Internal: make room for one new entry when at capacity
    fn evict_if_needed(shard: &mut CacheShard, max_entries: usize) {
        if shard.entries.len() < max_entries {
            return;
        }

        // Sweep expired entries first
        let expired: Vec<SentenceId> = shard
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(&id, _)| id)
            .collect();
        for id in &expired {
            shard.entries.remove(id);
        }
        shard.stats.evictions_ttl += expired.len() as u64;

        // Still full: evict whichever entry expires soonest
        while shard.entries.len() >= max_entries {
            let victim = shard
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(&id, _)| id);

            match victim {
                Some(id) => {
                    shard.entries.remove(&id);
                    shard.stats.evictions_size += 1;
                    debug!(sentence_id = id, "evicting entry at capacity");
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl SentenceCache for InMemorySentenceCache {
    async fn get(&self, id: SentenceId) -> Result<Option<SentenceDto>> {
        let mut shard = self.store.write().await;
        Ok(Self::lookup(&mut shard, id))
    }

    async fn set(&self, id: SentenceId, dto: &SentenceDto, ttl: Duration) -> Result<()> {
        let encoded = dto.to_cache_value()?;
        let entry = CacheEntry::new(encoded, ttl);

        let mut shard = self.store.write().await;
        if !shard.entries.contains_key(&id) {
            Self::evict_if_needed(&mut shard, self.config.max_entries);
        }
        shard.entries.insert(id, entry);
        shard.stats.entries = shard.entries.len();

        Ok(())
    }

    async fn multi_get(
        &self,
        ids: &[SentenceId],
    ) -> Result<Vec<(SentenceId, Option<SentenceDto>)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut shard = self.store.write().await;
        let mut pairs = Vec::with_capacity(ids.len());
        for &id in ids {
            let hit = Self::lookup(&mut shard, id);
            pairs.push((id, hit));
        }

        Ok(pairs)
    }
}
