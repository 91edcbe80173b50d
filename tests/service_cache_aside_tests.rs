//! Integration tests for the cache-aside retrieval engine
//!
//! These tests drive `SentenceService` through counting collaborator
//! doubles to verify the read-path contract:
//! - warm and cold single-id retrieval
//! - batch resolution hit/miss partitioning and write-back counts
//! - degradation on cache faults, propagation of store faults
//! - result randomization and order independence

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sentence_api::{
    CacheConfig, Category, InMemorySentenceCache, RandomIdGenerator, Result, Sentence,
    SentenceCache, SentenceDto, SentenceError, SentenceId, SentenceService, SentenceStore,
    ServiceConfig,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn category() -> Category {
    Category::new(1, "english", "short", "quote")
}

fn sentence(id: SentenceId, content: &str) -> Sentence {
    Sentence::new(id, content, category())
}

/// Entity-store double over a fixed record map, counting accesses
struct CountingStore {
    records: HashMap<SentenceId, Sentence>,
    sampled_ids: Vec<SentenceId>,
    point_lookups: AtomicUsize,
    batch_lookups: AtomicUsize,
    last_batch: Mutex<Vec<SentenceId>>,
}

impl CountingStore {
    fn new(records: Vec<Sentence>) -> Self {
        Self {
            records: records.into_iter().map(|s| (s.id, s)).collect(),
            sampled_ids: Vec::new(),
            point_lookups: AtomicUsize::new(0),
            batch_lookups: AtomicUsize::new(0),
            last_batch: Mutex::new(Vec::new()),
        }
    }

    /// Fix the id list the filtered samplers return
    fn with_sampled_ids(mut self, ids: Vec<SentenceId>) -> Self {
        self.sampled_ids = ids;
        self
    }

    fn point_lookups(&self) -> usize {
        self.point_lookups.load(Ordering::SeqCst)
    }

    fn batch_lookups(&self) -> usize {
        self.batch_lookups.load(Ordering::SeqCst)
    }

    fn last_batch(&self) -> Vec<SentenceId> {
        self.last_batch.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentenceStore for CountingStore {
    async fn find_by_id(&self, id: SentenceId) -> Result<Option<Sentence>> {
        self.point_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.get(&id).cloned())
    }

    async fn find_all_by_id(&self, ids: &[SentenceId]) -> Result<Vec<Sentence>> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        *self.last_batch.lock().unwrap() = ids.to_vec();

        // Return in reverse order: callers must not depend on store order
        let mut found: Vec<Sentence> = ids
            .iter()
            .filter_map(|id| self.records.get(id).cloned())
            .collect();
        found.reverse();
        Ok(found)
    }

    async fn find_random_ids_by_language(
        &self,
        _language: &str,
        count: u64,
    ) -> Result<Vec<SentenceId>> {
        Ok(self
            .sampled_ids
            .iter()
            .copied()
            .take(count as usize)
            .collect())
    }

    async fn find_random_ids_by_sort(&self, _sort: &str, count: u64) -> Result<Vec<SentenceId>> {
        Ok(self
            .sampled_ids
            .iter()
            .copied()
            .take(count as usize)
            .collect())
    }
}

/// Store double whose every method fails
struct UnreachableStore;

#[async_trait]
impl SentenceStore for UnreachableStore {
    async fn find_by_id(&self, _id: SentenceId) -> Result<Option<Sentence>> {
        Err(SentenceError::StoreFailure("connection refused".to_string()))
    }

    async fn find_all_by_id(&self, _ids: &[SentenceId]) -> Result<Vec<Sentence>> {
        Err(SentenceError::StoreFailure("connection refused".to_string()))
    }

    async fn find_random_ids_by_language(
        &self,
        _language: &str,
        _count: u64,
    ) -> Result<Vec<SentenceId>> {
        Err(SentenceError::StoreFailure("connection refused".to_string()))
    }

    async fn find_random_ids_by_sort(&self, _sort: &str, _count: u64) -> Result<Vec<SentenceId>> {
        Err(SentenceError::StoreFailure("connection refused".to_string()))
    }
}

/// Cache double wrapping the bundled cache, counting calls
struct CountingCache {
    inner: Arc<InMemorySentenceCache>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    multi_gets: AtomicUsize,
}

impl CountingCache {
    fn new(inner: Arc<InMemorySentenceCache>) -> Self {
        Self {
            inner,
            gets: AtomicUsize::new(0),
            sets: AtomicUsize::new(0),
            multi_gets: AtomicUsize::new(0),
        }
    }

    fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    fn multi_gets(&self) -> usize {
        self.multi_gets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentenceCache for CountingCache {
    async fn get(&self, id: SentenceId) -> Result<Option<SentenceDto>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id).await
    }

    async fn set(&self, id: SentenceId, dto: &SentenceDto, ttl: Duration) -> Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(id, dto, ttl).await
    }

    async fn multi_get(
        &self,
        ids: &[SentenceId],
    ) -> Result<Vec<(SentenceId, Option<SentenceDto>)>> {
        self.multi_gets.fetch_add(1, Ordering::SeqCst);
        self.inner.multi_get(ids).await
    }
}

/// Cache double whose every method fails
struct BrokenCache;

#[async_trait]
impl SentenceCache for BrokenCache {
    async fn get(&self, _id: SentenceId) -> Result<Option<SentenceDto>> {
        Err(SentenceError::StoreFailure("cache down".to_string()))
    }

    async fn set(&self, _id: SentenceId, _dto: &SentenceDto, _ttl: Duration) -> Result<()> {
        Err(SentenceError::StoreFailure("cache down".to_string()))
    }

    async fn multi_get(
        &self,
        _ids: &[SentenceId],
    ) -> Result<Vec<(SentenceId, Option<SentenceDto>)>> {
        Err(SentenceError::StoreFailure("cache down".to_string()))
    }
}

/// Id-generator double returning a scripted id list
struct FixedIdGenerator {
    ids: Vec<SentenceId>,
}

impl RandomIdGenerator for FixedIdGenerator {
    fn generate(&self, count: u64) -> Vec<SentenceId> {
        self.ids.iter().copied().take(count as usize).collect()
    }
}

struct Harness {
    store: Arc<CountingStore>,
    cache: Arc<CountingCache>,
    inner_cache: Arc<InMemorySentenceCache>,
    service: SentenceService,
}

fn harness(store: CountingStore, generated_ids: Vec<SentenceId>) -> Harness {
    init_tracing();

    let store = Arc::new(store);
    let inner_cache = Arc::new(InMemorySentenceCache::new(CacheConfig::default()));
    let cache = Arc::new(CountingCache::new(inner_cache.clone()));
    let service = SentenceService::new(
        store.clone(),
        cache.clone(),
        Arc::new(FixedIdGenerator { ids: generated_ids }),
        ServiceConfig::default(),
    );

    Harness {
        store,
        cache,
        inner_cache,
        service,
    }
}

fn id_multiset(dtos: &[SentenceDto]) -> Vec<SentenceId> {
    let mut ids: Vec<SentenceId> = dtos.iter().map(|dto| dto.id).collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn single_id_cold_then_warm() {
    let h = harness(
        CountingStore::new(vec![sentence(1, "a")]),
        vec![],
    );

    // Cold: store path, one point lookup, one cache write
    let dto = h.service.sentence_by_id(1).await.unwrap();
    assert_eq!(dto.content, "a");
    assert_eq!(h.store.point_lookups(), 1);
    assert_eq!(h.cache.sets(), 1);

    // Warm: cache path, no further store access
    let dto = h.service.sentence_by_id(1).await.unwrap();
    assert_eq!(dto.content, "a");
    assert_eq!(h.store.point_lookups(), 1);
    assert_eq!(h.cache.sets(), 1);
}

#[tokio::test]
async fn single_id_not_found_writes_nothing() {
    let h = harness(CountingStore::new(vec![]), vec![]);

    let error = h.service.sentence_by_id(5).await.unwrap_err();
    assert!(matches!(error, SentenceError::SentenceNotFound { id: 5 }));
    assert_eq!(h.cache.sets(), 0);
    assert!(h.inner_cache.is_empty().await);
}

#[tokio::test]
async fn empty_id_set_touches_nothing() {
    let h = harness(
        CountingStore::new(vec![sentence(1, "a")]).with_sampled_ids(vec![]),
        vec![],
    );

    // The sampler finds no matching ids; the engine must short-circuit
    let result = h
        .service
        .random_sentences_by_language("english", 10)
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(h.cache.multi_gets(), 0);
    assert_eq!(h.store.batch_lookups(), 0);
}

#[tokio::test]
async fn all_warm_batch_skips_the_store() {
    let h = harness(
        CountingStore::new(vec![sentence(1, "a"), sentence(2, "b"), sentence(3, "c")]),
        vec![1, 2, 3],
    );

    // First pass fills the cache from the store
    let first = h.service.random_sentences(3).await.unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(h.store.batch_lookups(), 1);

    // Second pass is fully warm: no new store access
    let second = h.service.random_sentences(3).await.unwrap();
    assert_eq!(second.len(), 3);
    assert_eq!(h.store.batch_lookups(), 1);
    assert_eq!(h.cache.multi_gets(), 2);
}

#[tokio::test]
async fn partial_hit_batch_fetches_only_the_misses() {
    let h = harness(
        CountingStore::new(vec![sentence(1, "a"), sentence(2, "b"), sentence(3, "c")]),
        vec![1, 2, 3],
    );

    // Warm id 1 behind the counter's back
    let warm = SentenceDto::of(&sentence(1, "a"));
    h.inner_cache
        .set(1, &warm, Duration::from_secs(300))
        .await
        .unwrap();

    let result = h.service.random_sentences(3).await.unwrap();

    // All three come back, any order
    assert_eq!(id_multiset(&result), vec![1, 2, 3]);
    let contents: HashSet<String> = result.into_iter().map(|dto| dto.content).collect();
    assert_eq!(
        contents,
        ["a", "b", "c"].iter().map(|s| s.to_string()).collect()
    );

    // Exactly one batched store lookup, for exactly the two misses
    assert_eq!(h.store.batch_lookups(), 1);
    assert_eq!(h.store.last_batch(), vec![2, 3]);

    // Exactly one cache write per missing-but-found record
    assert_eq!(h.cache.sets(), 2);
}

#[tokio::test]
async fn ids_absent_from_store_are_dropped_silently() {
    let h = harness(
        CountingStore::new(vec![sentence(1, "a")]),
        vec![1, 5, 6],
    );

    let result = h.service.random_sentences(3).await.unwrap();

    assert_eq!(id_multiset(&result), vec![1]);
    assert_eq!(h.store.batch_lookups(), 1);
    // Only the found record is written back
    assert_eq!(h.cache.sets(), 1);
}

#[tokio::test]
async fn fully_absent_batch_resolves_empty_without_error() {
    let h = harness(CountingStore::new(vec![]), vec![5]);

    let result = h.service.random_sentences(1).await.unwrap();
    assert!(result.is_empty());
    assert_eq!(h.cache.sets(), 0);
}

#[tokio::test]
async fn cache_outage_degrades_to_full_store_read() {
    init_tracing();

    let store = Arc::new(CountingStore::new(vec![
        sentence(1, "a"),
        sentence(2, "b"),
        sentence(3, "c"),
    ]));
    let service = SentenceService::new(
        store.clone(),
        Arc::new(BrokenCache),
        Arc::new(FixedIdGenerator { ids: vec![1, 2, 3] }),
        ServiceConfig::default(),
    );

    // Batch path: multi-get failure reads everything from the store
    let result = service.random_sentences(3).await.unwrap();
    assert_eq!(id_multiset(&result), vec![1, 2, 3]);
    assert_eq!(store.batch_lookups(), 1);
    assert_eq!(store.last_batch(), vec![1, 2, 3]);

    // Single path: get and set failures are both swallowed
    let dto = service.sentence_by_id(2).await.unwrap();
    assert_eq!(dto.content, "b");
}

#[tokio::test]
async fn store_failure_is_fatal() {
    init_tracing();

    let service = SentenceService::new(
        Arc::new(UnreachableStore),
        Arc::new(InMemorySentenceCache::new(CacheConfig::default())),
        Arc::new(FixedIdGenerator { ids: vec![1, 2] }),
        ServiceConfig::default(),
    );

    let error = service.sentence_by_id(1).await.unwrap_err();
    assert!(matches!(error, SentenceError::StoreFailure(_)));

    let error = service.random_sentences(2).await.unwrap_err();
    assert!(matches!(error, SentenceError::StoreFailure(_)));

    let error = service
        .random_sentences_by_language("english", 2)
        .await
        .unwrap_err();
    assert!(matches!(error, SentenceError::StoreFailure(_)));
}

#[tokio::test]
async fn recaching_the_same_record_is_idempotent() {
    let h = harness(CountingStore::new(vec![sentence(1, "a")]), vec![]);

    let warm = SentenceDto::of(&sentence(1, "a"));
    h.inner_cache
        .set(1, &warm, Duration::from_secs(300))
        .await
        .unwrap();
    h.inner_cache
        .set(1, &warm, Duration::from_secs(300))
        .await
        .unwrap();

    assert_eq!(h.inner_cache.len().await, 1);
    let dto = h.service.sentence_by_id(1).await.unwrap();
    assert_eq!(dto, warm);
    assert_eq!(h.store.point_lookups(), 0);
}

#[tokio::test]
async fn same_id_set_yields_same_multiset_across_runs() {
    let records: Vec<Sentence> = (1..=20)
        .map(|id| sentence(id, &format!("s{id}")))
        .collect();
    let ids: Vec<SentenceId> = (1..=20).collect();

    // Fresh cache each run; order may differ, the multiset may not
    let first = harness(CountingStore::new(records.clone()), ids.clone())
        .service
        .random_sentences(20)
        .await
        .unwrap();
    let second = harness(CountingStore::new(records), ids)
        .service
        .random_sentences(20)
        .await
        .unwrap();

    assert_eq!(id_multiset(&first), id_multiset(&second));
}

#[tokio::test]
async fn filtered_sampler_short_batches_are_served_as_is() {
    let h = harness(
        CountingStore::new(vec![sentence(1, "a"), sentence(2, "b")])
            .with_sampled_ids(vec![1, 2]),
        vec![],
    );

    // Asked for five, the population only has two
    let result = h
        .service
        .random_sentences_by_language("english", 5)
        .await
        .unwrap();
    assert_eq!(result.len(), 2);

    let by_sort = h
        .service
        .random_sentences_by_category_sort("quote", 5)
        .await
        .unwrap();
    assert_eq!(by_sort.len(), 2);
}

#[tokio::test]
async fn concurrent_callers_share_one_service() {
    let records: Vec<Sentence> = (1..=10).map(|id| sentence(id, &format!("s{id}"))).collect();
    let h = harness(CountingStore::new(records), (1..=10).collect());
    let service = Arc::new(h.service);

    let calls = (0..8).map(|_| {
        let service = service.clone();
        async move { service.random_sentences(10).await }
    });

    let results = futures::future::join_all(calls).await;
    for result in results {
        assert_eq!(id_multiset(&result.unwrap()), (1..=10).collect::<Vec<_>>());
    }
}
