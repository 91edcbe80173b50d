//! Entity store contract
//!
//! The durable backing store for sentence records lives outside this
//! library; the retrieval engine depends only on this trait. Any error
//! returned from a store method is fatal for the retrieval that issued
//! it - the engine never retries and never downgrades store faults.

use async_trait::async_trait;

use crate::domain::{Sentence, SentenceId};
use crate::error::Result;

/// Contract the durable entity store must provide
///
/// Implementations are expected to supply their own internal concurrency
/// safety; the engine calls them from arbitrary tasks.
#[async_trait]
pub trait SentenceStore: Send + Sync {
    /// Point lookup by identifier; `Ok(None)` when no such record exists
    async fn find_by_id(&self, id: SentenceId) -> Result<Option<Sentence>>;

    /// Batch lookup by identifier set
    ///
    /// Returned order is not guaranteed and unknown identifiers are
    /// silently omitted. One request regardless of batch size.
    async fn find_all_by_id(&self, ids: &[SentenceId]) -> Result<Vec<Sentence>>;

    /// Sample up to `count` random sentence ids whose category matches
    /// the given language; may return fewer when the matching population
    /// is too small
    async fn find_random_ids_by_language(
        &self,
        language: &str,
        count: u64,
    ) -> Result<Vec<SentenceId>>;

    /// Sample up to `count` random sentence ids whose category matches
    /// the given sort key; may return fewer when the matching population
    /// is too small
    async fn find_random_ids_by_sort(&self, sort: &str, count: u64) -> Result<Vec<SentenceId>>;
}
