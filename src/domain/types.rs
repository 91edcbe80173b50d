//! Type definitions for sentence and category records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a sentence record, assigned by the entity store
pub type SentenceId = i64;

/// Identifier of a category record, assigned by the entity store
pub type CategoryId = i64;

/// Category record grouping a collection of sentences
///
/// A sentence belongs to exactly one category; the category attributes
/// drive the filtered sampling paths (`language` and `sort`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier for the category
    pub id: CategoryId,
    /// Language the category's sentences are written in
    pub language: String,
    /// Kind of content (e.g. "short", "long")
    #[serde(rename = "type")]
    pub kind: String,
    /// Grouping key used for sort-filtered sampling
    pub sort: String,
}

impl Category {
    /// Create a new category with the given attributes
    pub fn new(
        id: CategoryId,
        language: impl Into<String>,
        kind: impl Into<String>,
        sort: impl Into<String>,
    ) -> Self {
        Self {
            id,
            language: language.into(),
            kind: kind.into(),
            sort: sort.into(),
        }
    }
}

/// Sentence record as stored by the entity store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Unique identifier for the sentence
    pub id: SentenceId,
    /// The text content
    pub content: String,
    /// Owning category
    pub category: Category,
    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl Sentence {
    /// Create a new sentence record in the given category
    pub fn new(id: SentenceId, content: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            content: content.into(),
            category,
            created_at: Utc::now(),
        }
    }

    /// Create a sentence record with an explicit creation timestamp
    pub fn with_created_at(
        id: SentenceId,
        content: impl Into<String>,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            category,
            created_at,
        }
    }
}
