//! Embedding provider implementations

mod hashing;
mod openai;

use std::sync::Arc;
use std::time::Duration;

pub use hashing::HashingEmbeddingProvider;
pub use openai::{model_dimensions, OpenAiEmbeddingProvider};

use crate::config::{EmbeddingConfig, EmbeddingProviderKind};
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::http_client::HttpClient;

/// Build the configured embedding provider
pub fn create_embedding_provider(
    config: &EmbeddingConfig,
) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
    match config.provider {
        EmbeddingProviderKind::Hashing => {
            Ok(Arc::new(HashingEmbeddingProvider::new(config.dimensions)?))
        }
        EmbeddingProviderKind::Openai => {
            let api_key = std::env::var(&config.api_key_env).map_err(|_| {
                DomainError::config(format!(
                    "Environment variable '{}' must hold the OpenAI API key",
                    config.api_key_env
                ))
            })?;

            let client = HttpClient::with_timeout(Duration::from_millis(config.timeout_ms))?;

            let provider = match &config.base_url {
                Some(base_url) => OpenAiEmbeddingProvider::with_base_url(
                    client,
                    api_key,
                    &config.model,
                    config.dimensions,
                    base_url,
                ),
                None => {
                    OpenAiEmbeddingProvider::new(client, api_key, &config.model, config.dimensions)
                }
            };

            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds_hashing_provider() {
        let provider = create_embedding_provider(&EmbeddingConfig::default()).unwrap();

        assert_eq!(provider.provider_name(), "hashing");
        assert_eq!(provider.dimensions(), 256);
    }

    #[test]
    fn test_openai_without_key_is_config_error() {
        let config = EmbeddingConfig {
            provider: EmbeddingProviderKind::Openai,
            api_key_env: "KNOWLEDGE_TEST_UNSET_OPENAI_KEY".to_string(),
            ..EmbeddingConfig::default()
        };

        let result = create_embedding_provider(&config);

        assert!(matches!(result, Err(DomainError::Config { .. })));
    }
}
