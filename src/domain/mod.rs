//! Domain model for sentence records
//!
//! Sentences are short text items owned by a category; the category
//! carries the language, kind, and sort attributes used for filtered
//! sampling. Records are read-only from this library's point of view:
//! the retrieval engine copies them into transfer-shaped DTOs and never
//! mutates them.

pub mod dto;
pub mod types;

pub use dto::SentenceDto;
pub use types::{Category, CategoryId, Sentence, SentenceId};
