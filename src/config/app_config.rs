use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{DistanceMetric, DomainError};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON knowledge source loaded at startup
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Tag written on every entry; entries carrying it are replaced on re-index
    #[serde(default = "default_generation")]
    pub generation: String,
    /// Directory for collection snapshots; in-memory only when unset
    #[serde(default)]
    pub persist_dir: Option<PathBuf>,
    #[serde(default)]
    pub distance_metric: DistanceMetric,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    #[serde(default = "default_n_results")]
    pub default_n_results: usize,
    /// Per-category lookup budget
    #[serde(default = "default_query_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderKind {
    #[default]
    Hashing,
    #[serde(alias = "open_ai")]
    Openai,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    #[serde(default)]
    pub provider: EmbeddingProviderKind,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_embedding_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("knowledge_base.json")
}

fn default_generation() -> String {
    "init".to_string()
}

fn default_n_results() -> usize {
    2
}

fn default_query_timeout_ms() -> u64 {
    2000
}

fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_dimensions() -> usize {
    256
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_embedding_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            generation: default_generation(),
            persist_dir: None,
            distance_metric: DistanceMetric::default(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_n_results: default_n_results(),
            timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl QueryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: default_embedding_model(),
            dimensions: default_dimensions(),
            base_url: None,
            api_key_env: default_api_key_env(),
            timeout_ms: default_embedding_timeout_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings that would only fail later, mid-startup
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.index.generation.trim().is_empty() {
            return Err(DomainError::config("index.generation must not be empty"));
        }

        if self.query.timeout_ms == 0 {
            return Err(DomainError::config("query.timeout_ms must be greater than 0"));
        }

        if self.embedding.dimensions == 0 {
            return Err(DomainError::config(
                "embedding.dimensions must be greater than 0",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.knowledge.source_path, PathBuf::from("knowledge_base.json"));
        assert_eq!(config.index.generation, "init");
        assert!(config.index.persist_dir.is_none());
        assert_eq!(config.index.distance_metric, DistanceMetric::Cosine);
        assert_eq!(config.query.default_n_results, 2);
        assert_eq!(config.query.timeout(), Duration::from_millis(2000));
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Hashing);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "index": {"distance_metric": "euclidean"},
            "embedding": {"provider": "openai", "dimensions": 1536}
        }))
        .unwrap();

        assert_eq!(config.index.generation, "init");
        assert_eq!(config.index.distance_metric, DistanceMetric::Euclidean);
        assert_eq!(config.embedding.provider, EmbeddingProviderKind::Openai);
        assert_eq!(config.embedding.dimensions, 1536);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let mut config = AppConfig::default();
        config.embedding.dimensions = 0;

        assert!(matches!(config.validate(), Err(DomainError::Config { .. })));
    }

    #[test]
    fn test_validate_rejects_blank_generation() {
        let mut config = AppConfig::default();
        config.index.generation = "  ".to_string();

        assert!(matches!(config.validate(), Err(DomainError::Config { .. })));
    }
}
