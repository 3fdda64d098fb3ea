//! Offline feature-hashing embedding provider

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::{DomainError, EmbeddingProvider};

/// Bumped whenever tokenizing or bucketing changes
const HASHING_MODEL: &str = "sha256-signed-buckets-v1";

/// Deterministic bag-of-words embedder
///
/// Each lower-cased word is hashed into one of `dimensions` signed buckets
/// and the result is L2-normalized, so texts sharing words end up close
/// under cosine distance. Needs no network and yields the same vectors on
/// every platform, which keeps persisted snapshots valid across restarts.
/// Text without words embeds to the zero vector.
#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::config(
                "Hashing embedder needs at least one dimension",
            ));
        }

        Ok(Self { dimensions })
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for word in text.unicode_words() {
            let (bucket, sign) = self.bucket(&word.to_lowercase());
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }

        vector
    }

    fn bucket(&self, token: &str) -> (usize, f32) {
        let digest = Sha256::digest(token.as_bytes());

        let mut index_bytes = [0u8; 8];
        index_bytes.copy_from_slice(&digest[..8]);
        let bucket = (u64::from_le_bytes(index_bytes) % self.dimensions as u64) as usize;
        let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };

        (bucket, sign)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn model(&self) -> String {
        HASHING_MODEL.to_string()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
