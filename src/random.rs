//! Random identifier generation for the unfiltered sampling path

use rand::seq::index::sample;

use crate::domain::SentenceId;

/// Produces distinct valid identifiers drawn from the full population
pub trait RandomIdGenerator: Send + Sync {
    /// Generate up to `count` distinct identifiers
    fn generate(&self, count: u64) -> Vec<SentenceId>;
}

/// Samples ids uniformly from the contiguous range `1..=max_id`
///
/// Matches a store whose sentence ids are dense and assigned
/// sequentially from 1; `max_id` mirrors the stored population size.
#[derive(Debug, Clone)]
pub struct UniformIdGenerator {
    max_id: u64,
}

impl UniformIdGenerator {
    /// Create a generator over the population `1..=max_id`
    pub fn new(max_id: u64) -> Self {
        Self { max_id }
    }
}

impl RandomIdGenerator for UniformIdGenerator {
    fn generate(&self, count: u64) -> Vec<SentenceId> {
        if self.max_id == 0 || count == 0 {
            return Vec::new();
        }

        if count >= self.max_id {
            return (1..=self.max_id as SentenceId).collect();
        }

        let mut rng = rand::thread_rng();
        sample(&mut rng, self.max_id as usize, count as usize)
            .into_iter()
            .map(|index| index as SentenceId + 1)
            .collect()
    }
}
