//! Cache-aside retrieval engine
//!
//! `SentenceService` orchestrates the read path: single-id and batch-id
//! retrieval, merging cache and store results, repopulating the cache on
//! miss, and randomizing final order. It is stateless; all mutable state
//! lives in the collaborators behind the trait objects, so one instance
//! serves arbitrarily many concurrent callers.
//!
//! Reliability is deliberately asymmetric: cache faults are downgraded
//! to misses at the call site, entity-store faults fail the retrieval
//! immediately. There is no retry logic and no de-duplication of
//! concurrent identical fetches; two racing misses for the same id may
//! both read the store and both write the cache, and last-writer-wins.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::cache::SentenceCache;
use crate::config::ServiceConfig;
use crate::domain::{SentenceDto, SentenceId};
use crate::error::{Result, SentenceError};
use crate::random::RandomIdGenerator;
use crate::store::SentenceStore;
use crate::validation::{validate_count, validate_language, validate_sort};

/// Sentence retrieval service with a cache-aside read path
pub struct SentenceService {
    store: Arc<dyn SentenceStore>,
    cache: Arc<dyn SentenceCache>,
    ids: Arc<dyn RandomIdGenerator>,
    config: ServiceConfig,
}

impl SentenceService {
    /// Create a new service over the given collaborators
    pub fn new(
        store: Arc<dyn SentenceStore>,
        cache: Arc<dyn SentenceCache>,
        ids: Arc<dyn RandomIdGenerator>,
        config: ServiceConfig,
    ) -> Self {
        info!(
            cache_ttl_secs = config.cache_ttl.as_secs(),
            max_random_count = config.max_random_count,
            "initializing sentence service"
        );

        Self {
            store,
            cache,
            ids,
            config,
        }
    }

    /// Retrieve one sentence by identifier
    ///
    /// Cache hit returns immediately with no store access; on miss the
    /// record is read from the store, cached with the standard TTL, and
    /// returned. A missing record is [`SentenceError::SentenceNotFound`]
    /// and writes nothing to the cache.
    pub async fn sentence_by_id(&self, id: SentenceId) -> Result<SentenceDto> {
        if let Some(cached) = self.cached_sentence(id).await {
            return Ok(cached);
        }

        let sentence = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(SentenceError::SentenceNotFound { id })?;

        let dto = SentenceDto::of(&sentence);
        self.cache_sentence(id, &dto).await;
        Ok(dto)
    }

    /// Retrieve `count` sentences chosen pseudo-randomly from the full
    /// population
    pub async fn random_sentences(&self, count: u64) -> Result<Vec<SentenceDto>> {
        validate_count(count, &self.config)?;

        let random_ids = self.ids.generate(count);
        self.resolve_by_ids(random_ids).await
    }

    /// Retrieve `count` random sentences whose category matches the
    /// given language
    ///
    /// If the store's sampler finds fewer matching ids than requested,
    /// the smaller set is served as-is.
    pub async fn random_sentences_by_language(
        &self,
        language: &str,
        count: u64,
    ) -> Result<Vec<SentenceDto>> {
        validate_language(language, &self.config)?;
        validate_count(count, &self.config)?;

        let random_ids = self
            .store
            .find_random_ids_by_language(language, count)
            .await?;
        self.resolve_by_ids(random_ids).await
    }

    /// Retrieve `count` random sentences whose category matches the
    /// given sort key
    pub async fn random_sentences_by_category_sort(
        &self,
        sort: &str,
        count: u64,
    ) -> Result<Vec<SentenceDto>> {
        validate_sort(sort, &self.config)?;
        validate_count(count, &self.config)?;

        let random_ids = self.store.find_random_ids_by_sort(sort, count).await?;
        self.resolve_by_ids(random_ids).await
    }

    /// Batch cache-aside resolution
    ///
    /// One cache multi-get partitions the ids into hits and misses; the
    /// misses are fetched in one batched store lookup, written back to
    /// the cache individually, and merged with the hits. The merged list
    /// is fully shuffled before returning so ordering carries no signal
    /// about cache state or input order. Ids absent from both cache and
    /// store are dropped without error. Caller-supplied duplicates are
    /// not deduplicated here; duplicates that miss collapse in the
    /// store's batch lookup.
    async fn resolve_by_ids(&self, ids: Vec<SentenceId>) -> Result<Vec<SentenceDto>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let pairs = match self.cache.multi_get(&ids).await {
            Ok(pairs) => pairs,
            Err(error) => {
                // Cache unavailability degrades to a full store read
                warn!(error = %error, "cache multi-get failed; treating all ids as misses");
                ids.iter().map(|&id| (id, None)).collect()
            }
        };

        let mut resolved = Vec::with_capacity(ids.len());
        let mut missing_ids = Vec::new();
        for (id, hit) in pairs {
            match hit {
                Some(dto) => resolved.push(dto),
                None => missing_ids.push(id),
            }
        }
        debug!(
            requested = ids.len(),
            hits = resolved.len(),
            misses = missing_ids.len(),
            "cache multi-get partitioned"
        );

        if !missing_ids.is_empty() {
            let fetched = self.store.find_all_by_id(&missing_ids).await?;
            for sentence in &fetched {
                let dto = SentenceDto::of(sentence);
                self.cache_sentence(sentence.id, &dto).await;
                resolved.push(dto);
            }
        }

        resolved.shuffle(&mut rand::thread_rng());
        Ok(resolved)
    }

    /// Cache read with the fault policy applied: any cache-layer error
    /// reads as a miss
    async fn cached_sentence(&self, id: SentenceId) -> Option<SentenceDto> {
        match self.cache.get(id).await {
            Ok(hit) => hit,
            Err(error) => {
                warn!(sentence_id = id, error = %error, "cache read failed; treating as miss");
                None
            }
        }
    }

    /// Cache write with the fault policy applied: failures are logged
    /// and swallowed
    async fn cache_sentence(&self, id: SentenceId, dto: &SentenceDto) {
        if let Err(error) = self.cache.set(id, dto, self.config.cache_ttl).await {
            warn!(sentence_id = id, error = %error, "cache write failed; serving without caching");
        }
    }
}
