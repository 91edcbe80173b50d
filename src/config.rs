//! Service configuration
//!
//! Carries the retrieval engine's policy knobs: the uniform cache TTL,
//! the allowed random-count range, and the recognized language/sort
//! values the validation checks run against. Defaults are named
//! constants; everything is overridable through the builder or the
//! environment.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::{Result, SentenceError};

/// Default cache duration applied to every cache write, in minutes
pub const CACHE_DURATION_MINUTES: u64 = 30;

/// Default upper bound for a single random-retrieval request
pub const MAX_RANDOM_COUNT: u64 = 100;

/// Environment variable overriding the cache TTL (minutes)
pub const ENV_CACHE_TTL_MINUTES: &str = "SENTENCE_CACHE_TTL_MINUTES";

/// Environment variable overriding the maximum random count
pub const ENV_MAX_RANDOM_COUNT: &str = "SENTENCE_MAX_RANDOM_COUNT";

fn default_languages() -> HashSet<String> {
    ["korean", "english"].iter().map(|s| s.to_string()).collect()
}

fn default_sorts() -> HashSet<String> {
    ["proverb", "quote", "phrase", "paragraph"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Configuration for the sentence retrieval service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Time-to-live applied uniformly to every cache write
    pub cache_ttl: Duration,

    /// Maximum count accepted by the random-retrieval paths
    pub max_random_count: u64,

    /// Language values the language filter recognizes
    pub languages: HashSet<String>,

    /// Sort values the category-sort filter recognizes
    pub sorts: HashSet<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(CACHE_DURATION_MINUTES * 60),
            max_random_count: MAX_RANDOM_COUNT,
            languages: default_languages(),
            sorts: default_sorts(),
        }
    }
}

impl ServiceConfig {
    /// Create a new builder for service configuration
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Load configuration from the environment
    ///
    /// Reads a `.env` file when present, then applies
    /// `SENTENCE_CACHE_TTL_MINUTES` and `SENTENCE_MAX_RANDOM_COUNT` on
    /// top of the defaults. Unset variables keep their defaults;
    /// unparsable values are a configuration error.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_CACHE_TTL_MINUTES) {
            let minutes: u64 = raw.parse().map_err(|_| {
                SentenceError::Config(format!("{ENV_CACHE_TTL_MINUTES} must be an integer: {raw}"))
            })?;
            config.cache_ttl = Duration::from_secs(minutes * 60);
        }

        if let Ok(raw) = std::env::var(ENV_MAX_RANDOM_COUNT) {
            config.max_random_count = raw.parse().map_err(|_| {
                SentenceError::Config(format!("{ENV_MAX_RANDOM_COUNT} must be an integer: {raw}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl.is_zero() {
            return Err(SentenceError::Config(
                "cache_ttl must be greater than zero".to_string(),
            ));
        }

        if self.max_random_count == 0 {
            return Err(SentenceError::Config(
                "max_random_count must be greater than zero".to_string(),
            ));
        }

        if self.languages.is_empty() {
            return Err(SentenceError::Config(
                "at least one recognized language is required".to_string(),
            ));
        }

        if self.sorts.is_empty() {
            return Err(SentenceError::Config(
                "at least one recognized sort is required".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for service configuration
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    cache_ttl: Option<Duration>,
    max_random_count: Option<u64>,
    languages: Option<HashSet<String>>,
    sorts: Option<HashSet<String>>,
}

impl ServiceConfigBuilder {
    /// Set the TTL applied to every cache write
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Set the maximum random-retrieval count
    pub fn max_random_count(mut self, max: u64) -> Self {
        self.max_random_count = Some(max);
        self
    }

    /// Set the recognized language values
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Set the recognized sort values
    pub fn sorts<I, S>(mut self, sorts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sorts = Some(sorts.into_iter().map(Into::into).collect());
        self
    }

    /// Build the service configuration
    pub fn build(self) -> ServiceConfig {
        let defaults = ServiceConfig::default();

        ServiceConfig {
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            max_random_count: self.max_random_count.unwrap_or(defaults.max_random_count),
            languages: self.languages.unwrap_or(defaults.languages),
            sorts: self.sorts.unwrap_or(defaults.sorts),
        }
    }
}
