//! Request validation for the retrieval paths
//!
//! Count, language, and sort checks run before any cache or store
//! access. Each failure is a typed error the service surfaces unchanged;
//! the web boundary maps them to status codes via
//! [`SentenceError::http_status`](crate::error::SentenceError::http_status).

use crate::config::ServiceConfig;
use crate::error::{Result, SentenceError};

/// Validate a requested count against the configured range
pub fn validate_count(count: u64, config: &ServiceConfig) -> Result<()> {
    if count == 0 || count > config.max_random_count {
        return Err(SentenceError::RangeOutOfBound {
            count,
            max: config.max_random_count,
        });
    }
    Ok(())
}

/// Validate that a language filter value is recognized
pub fn validate_language(language: &str, config: &ServiceConfig) -> Result<()> {
    if !config.languages.contains(language) {
        return Err(SentenceError::LanguageNotFound(language.to_string()));
    }
    Ok(())
}

/// Validate that a category-sort filter value is recognized
pub fn validate_sort(sort: &str, config: &ServiceConfig) -> Result<()> {
    if !config.sorts.contains(sort) {
        return Err(SentenceError::SortNotFound(sort.to_string()));
    }
    Ok(())
}
