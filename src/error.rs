//! Error types for sentence retrieval operations
//!
//! This module defines the error taxonomy for the sentence-api library:
//! not-found and range errors surfaced to callers, fatal entity-store
//! failures, and the serialization errors raised at the cache boundary
//! (which the retrieval engine downgrades to cache misses).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SentenceId;

/// Main error type for sentence retrieval operations
#[derive(Error, Debug)]
pub enum SentenceError {
    /// No sentence exists with the requested identifier
    #[error("sentence not found: {id}")]
    SentenceNotFound { id: SentenceId },

    /// The requested language is not a recognized language value
    #[error("language not found: {0}")]
    LanguageNotFound(String),

    /// The requested category sort is not a recognized sort value
    #[error("category sort not found: {0}")]
    SortNotFound(String),

    /// The requested count is outside the allowed range
    #[error("count out of range: {count} (allowed 1..={max})")]
    RangeOutOfBound { count: u64, max: u64 },

    /// Entity store failure - fatal, never retried
    #[error("entity store failure: {0}")]
    StoreFailure(String),

    /// Serialization/Deserialization error at the cache boundary
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl SentenceError {
    /// HTTP status code equivalent for the web boundary
    pub fn http_status(&self) -> u16 {
        match self {
            SentenceError::SentenceNotFound { .. } => 404,
            SentenceError::LanguageNotFound(_) => 404,
            SentenceError::SortNotFound(_) => 404,
            SentenceError::RangeOutOfBound { .. } => 400,
            SentenceError::StoreFailure(_) => 500,
            SentenceError::Serialization(_) => 500,
            SentenceError::Config(_) => 500,
        }
    }

    /// Whether this error is a client-side (4xx) failure
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

/// Result type alias for sentence retrieval operations
pub type Result<T> = std::result::Result<T, SentenceError>;

/// Client-facing error shape, serialized at the web boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub http_status: u16,
    pub error_msg: String,
}

impl From<&SentenceError> for ErrorResponse {
    fn from(error: &SentenceError) -> Self {
        Self {
            http_status: error.http_status(),
            error_msg: error.to_string(),
        }
    }
}

impl From<String> for SentenceError {
    fn from(s: String) -> Self {
        SentenceError::StoreFailure(s)
    }
}
