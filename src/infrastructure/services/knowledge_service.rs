//! Knowledge service - Public entry point of the retrieval subsystem

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::indexer::{IndexReport, Indexer};
use super::prompt_composer::PromptComposer;
use super::query_engine::{QueryEngine, QueryResultBundle};
use crate::config::AppConfig;
use crate::domain::{CompanyInfo, DomainError, KnowledgeStore, SemanticIndex, Service};

/// Settings the service needs once the knowledge base is loaded
#[derive(Debug, Clone)]
pub struct KnowledgeServiceSettings {
    pub generation: String,
    pub default_n_results: usize,
    pub query_timeout: Duration,
}

impl Default for KnowledgeServiceSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl KnowledgeServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            generation: config.index.generation.clone(),
            default_n_results: config.query.default_n_results,
            query_timeout: config.query.timeout(),
        }
    }
}

/// A loaded and indexed knowledge base, ready to answer queries
///
/// Only [`KnowledgeService::initialize`] produces one, so holding a
/// `KnowledgeService` means indexing has completed. Clones share the same
/// store and collections.
#[derive(Clone)]
pub struct KnowledgeService {
    store: Arc<KnowledgeStore>,
    indexer: Arc<Indexer>,
    engine: Arc<QueryEngine>,
    composer: PromptComposer,
    default_n_results: usize,
    last_report: IndexReport,
}

impl std::fmt::Debug for KnowledgeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeService")
            .field("indexer", &self.indexer)
            .field("engine", &self.engine)
            .field("default_n_results", &self.default_n_results)
            .finish()
    }
}

impl KnowledgeService {
    /// Index the store and hand out a ready service
    #[instrument(skip_all, fields(generation = %settings.generation, backend = index.backend_name()))]
    pub async fn initialize(
        store: KnowledgeStore,
        index: Arc<dyn SemanticIndex>,
        settings: KnowledgeServiceSettings,
    ) -> Result<Self, DomainError> {
        let indexer = Indexer::new(index.clone(), settings.generation);
        let last_report = indexer.index_all(&store).await?;

        info!(
            entries = last_report.total_indexed(),
            metric = %index.distance_metric(),
            "Knowledge service ready"
        );

        Ok(Self {
            store: Arc::new(store),
            indexer: Arc::new(indexer),
            engine: Arc::new(QueryEngine::new(index, settings.query_timeout)),
            composer: PromptComposer::new(),
            default_n_results: settings.default_n_results,
            last_report,
        })
    }

    /// Ranked hits per category; never fails, degraded categories are empty
    #[instrument(skip(self))]
    pub async fn query_knowledge(&self, query: &str, n_results: usize) -> QueryResultBundle {
        self.engine.query(query, n_results).await
    }

    /// Same as [`query_knowledge`](Self::query_knowledge) with the configured result count
    pub async fn query_knowledge_default(&self, query: &str) -> QueryResultBundle {
        self.query_knowledge(query, self.default_n_results).await
    }

    pub fn get_service_by_name(&self, name: &str) -> Option<&Service> {
        self.store.get_service_by_name(name)
    }

    pub fn get_all_services(&self) -> &[Service] {
        self.store.get_all_services()
    }

    pub fn get_company_info(&self) -> &CompanyInfo {
        self.store.get_company_info()
    }

    pub fn build_static_briefing(&self) -> String {
        self.composer.build_static_briefing(&self.store)
    }

    pub fn store(&self) -> &KnowledgeStore {
        &self.store
    }

    /// Report of the most recent indexing run
    pub fn last_report(&self) -> &IndexReport {
        &self.last_report
    }

    /// Re-run indexing for the current generation
    ///
    /// Takes `&mut self` so no query through this handle can overlap it.
    #[instrument(skip(self), fields(generation = %self.indexer.generation()))]
    pub async fn reindex(&mut self) -> Result<&IndexReport, DomainError> {
        self.last_report = self.indexer.index_all(&self.store).await?;
        Ok(&self.last_report)
    }
}
