//! # sentence-api
//!
//! A read-path service layer for serving sentence records: lookup by
//! identifier and random sampling filtered by language or category
//! grouping, fronted by a cache-aside layer.
//!
//! ## Features
//!
//! - Cache-aside batch resolution: one cache multi-get, one batched
//!   store lookup for the misses, individual TTL-bounded write-backs
//! - Asymmetric reliability: cache faults degrade to misses, entity
//!   store faults fail the request
//! - Result-order randomization so responses carry no cache-state signal
//! - Async-first design using tokio; collaborators behind async traits
//! - Typed error taxonomy with HTTP status mapping for the web boundary
//! - Bundled bounded in-memory cache implementation with metrics
//!
//! ## Single-identifier lookup
//!
//! ```no_run
//! use std::sync::Arc;
//! use sentence_api::{
//!     CacheConfig, InMemorySentenceCache, SentenceService, ServiceConfig, UniformIdGenerator,
//! };
//! # use sentence_api::{Result, Sentence, SentenceId, SentenceStore};
//! # use async_trait::async_trait;
//! # struct MyStore;
//! # #[async_trait]
//! # impl SentenceStore for MyStore {
//! #     async fn find_by_id(&self, _: SentenceId) -> Result<Option<Sentence>> { todo!() }
//! #     async fn find_all_by_id(&self, _: &[SentenceId]) -> Result<Vec<Sentence>> { todo!() }
//! #     async fn find_random_ids_by_language(&self, _: &str, _: u64) -> Result<Vec<SentenceId>> { todo!() }
//! #     async fn find_random_ids_by_sort(&self, _: &str, _: u64) -> Result<Vec<SentenceId>> { todo!() }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(MyStore); // any SentenceStore implementation
//!     let cache = Arc::new(InMemorySentenceCache::new(CacheConfig::default()));
//!     let ids = Arc::new(UniformIdGenerator::new(10_000));
//!
//!     let service = SentenceService::new(store, cache, ids, ServiceConfig::default());
//!
//!     let sentence = service.sentence_by_id(42).await?;
//!     println!("{}", sentence.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Random sampling
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use sentence_api::*;
//! # use async_trait::async_trait;
//! # struct MyStore;
//! # #[async_trait]
//! # impl SentenceStore for MyStore {
//! #     async fn find_by_id(&self, _: SentenceId) -> Result<Option<Sentence>> { todo!() }
//! #     async fn find_all_by_id(&self, _: &[SentenceId]) -> Result<Vec<Sentence>> { todo!() }
//! #     async fn find_random_ids_by_language(&self, _: &str, _: u64) -> Result<Vec<SentenceId>> { todo!() }
//! #     async fn find_random_ids_by_sort(&self, _: &str, _: u64) -> Result<Vec<SentenceId>> { todo!() }
//! # }
//! # async fn example() -> anyhow::Result<()> {
//! # let store = Arc::new(MyStore);
//! # let cache = Arc::new(InMemorySentenceCache::new(CacheConfig::default()));
//! # let ids = Arc::new(UniformIdGenerator::new(10_000));
//! let service = SentenceService::new(store, cache, ids, ServiceConfig::from_env()?);
//!
//! // Twenty random sentences from the whole population
//! let batch = service.random_sentences(20).await?;
//!
//! // Ten random Korean sentences
//! let korean = service.random_sentences_by_language("korean", 10).await?;
//!
//! // Five random proverbs
//! let proverbs = service.random_sentences_by_category_sort("proverb", 5).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling at the web boundary
//!
//! ```
//! use sentence_api::{ErrorResponse, SentenceError};
//!
//! let error = SentenceError::SentenceNotFound { id: 7 };
//! let response = ErrorResponse::from(&error);
//! assert_eq!(response.http_status, 404);
//! ```

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod random;
pub mod service;
pub mod store;
pub mod validation;

// Re-export main types for convenience
pub use cache::{CacheConfig, CacheConfigBuilder, CacheEntry, CacheStats, InMemorySentenceCache, SentenceCache};
pub use config::{ServiceConfig, ServiceConfigBuilder, CACHE_DURATION_MINUTES, MAX_RANDOM_COUNT};
pub use domain::{Category, CategoryId, Sentence, SentenceDto, SentenceId};
pub use error::{ErrorResponse, Result, SentenceError};
pub use random::{RandomIdGenerator, UniformIdGenerator};
pub use service::SentenceService;
pub use store::SentenceStore;
