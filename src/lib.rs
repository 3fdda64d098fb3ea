//! Knowledge Retrieval
//!
//! Retrieval subsystem for a conversational agent that answers questions
//! about a business:
//! - Structured knowledge base (services, FAQs, company profile) loaded from JSON
//! - Per-category semantic collections rebuilt idempotently at startup
//! - Per-category similarity queries that degrade instead of failing
//! - A static briefing that seeds the agent's initial context

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use infrastructure::services::{KnowledgeService, KnowledgeServiceSettings, QueryResultBundle};

use std::sync::Arc;

use domain::{KnowledgeStore, SemanticIndex};
use infrastructure::embedding::create_embedding_provider;
use infrastructure::semantic_index::InMemorySemanticIndex;
use tracing::info;

/// Create a ready knowledge service from the default configuration
pub async fn create_knowledge_service() -> anyhow::Result<KnowledgeService> {
    create_knowledge_service_with_config(&AppConfig::default()).await
}

/// Load, index and return a ready knowledge service
pub async fn create_knowledge_service_with_config(
    config: &AppConfig,
) -> anyhow::Result<KnowledgeService> {
    config.validate()?;

    let store = KnowledgeStore::from_path(&config.knowledge.source_path)?;
    let index = create_semantic_index(config)?;

    let service =
        KnowledgeService::initialize(store, index, KnowledgeServiceSettings::from_config(config))
            .await?;

    Ok(service)
}

/// Build the configured semantic index backend
pub fn create_semantic_index(config: &AppConfig) -> anyhow::Result<Arc<dyn SemanticIndex>> {
    let embedder = create_embedding_provider(&config.embedding)?;

    info!(
        embedder = embedder.provider_name(),
        dimensions = embedder.dimensions(),
        metric = %config.index.distance_metric,
        "Creating semantic index"
    );

    let mut index =
        InMemorySemanticIndex::new(embedder).with_distance_metric(config.index.distance_metric);

    if let Some(dir) = &config.index.persist_dir {
        info!(dir = %dir.display(), "Persisting collections");
        index = index.with_persistence(dir);
    }

    Ok(Arc::new(index))
}
