//! Embedding provider trait definition

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Turns text into fixed-size vectors (OpenAI, local hashing, etc.)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, one vector per input in input order
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Model that produced the vectors; vectors of different models never mix
    fn model(&self) -> String;

    /// Length of every vector this provider returns
    fn dimensions(&self) -> usize;
}

/// Embed a single text
pub async fn embed_one(
    provider: &dyn EmbeddingProvider,
    text: &str,
) -> Result<Vec<f32>, DomainError> {
    provider
        .embed(vec![text.to_string()])
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| {
            DomainError::provider(provider.provider_name(), "Provider returned no embedding")
        })
}
