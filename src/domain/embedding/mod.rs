//! Embedding provider domain models and traits

mod provider;
mod similarity;

pub use provider::{embed_one, EmbeddingProvider};
pub use similarity::{cosine_similarity, DistanceMetric};

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
