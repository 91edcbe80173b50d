//! Transfer shape for sentence records and its cache serialization contract
//!
//! `SentenceDto` is what callers receive and what the cache stores. The
//! cache boundary uses the explicit `to_cache_value`/`from_cache_value`
//! pair (JSON) rather than implicit object serialization, so the encoded
//! form is a stable contract shared by every cache implementation.

use serde::{Deserialize, Serialize};

use crate::domain::types::{Sentence, SentenceId};
use crate::error::{Result, SentenceError};

/// Transfer-shaped copy of a sentence record
///
/// Flattens the owning category's attributes into the fields clients
/// actually consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceDto {
    /// Sentence identifier
    pub id: SentenceId,
    /// The text content
    pub content: String,
    /// Language of the owning category
    pub language: String,
    /// Grouping key of the owning category
    pub sort: String,
}

impl SentenceDto {
    /// Build the transfer shape from a stored record
    pub fn of(sentence: &Sentence) -> Self {
        Self {
            id: sentence.id,
            content: sentence.content.clone(),
            language: sentence.category.language.clone(),
            sort: sentence.category.sort.clone(),
        }
    }

    /// Encode for a cache write
    pub fn to_cache_value(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SentenceError::Serialization(e.to_string()))
    }

    /// Decode a cached value
    pub fn from_cache_value(value: &str) -> Result<Self> {
        serde_json::from_str(value).map_err(|e| SentenceError::Serialization(e.to_string()))
    }
}
