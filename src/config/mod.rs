//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, EmbeddingConfig, EmbeddingProviderKind, IndexConfig, KnowledgeConfig, LogFormat,
    LoggingConfig, QueryConfig,
};
