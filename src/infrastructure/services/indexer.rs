//! Indexer - Renders knowledge items and (re)populates category collections

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::semantic_index::{Category, EntryKind, EntryMetadata, IndexRecord};
use crate::domain::{
    CompanyInfo, DomainError, Faq, KnowledgeStore, MetadataFilter, SemanticIndex, Service,
};

/// Id of the single company profile record
pub const COMPANY_RECORD_ID: &str = "company_main";

/// Outcome of one category within an indexing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryReport {
    /// Previously indexed entries removed before inserting, from any generation
    pub removed: usize,
    pub indexed: usize,
}

/// Summary of an indexing run
#[derive(Debug, Clone, Serialize)]
pub struct IndexReport {
    pub generation: String,
    pub categories: BTreeMap<Category, CategoryReport>,
    pub completed_at: DateTime<Utc>,
}

impl IndexReport {
    pub fn category(&self, category: Category) -> CategoryReport {
        self.categories.get(&category).copied().unwrap_or_default()
    }

    pub fn total_indexed(&self) -> usize {
        self.categories.values().map(|c| c.indexed).sum()
    }
}

pub fn render_service(service: &Service) -> String {
    format!(
        "{}: {}. Features: {}.",
        service.name(),
        service.description(),
        service.features().join(", ")
    )
}

pub fn render_faq(faq: &Faq) -> String {
    format!("Q: {} A: {}", faq.question(), faq.answer())
}

pub fn render_company(company: &CompanyInfo) -> String {
    format!(
        "{}: {} Values: {}",
        company.name(),
        company.description(),
        company.values().join(", ")
    )
}

/// Builds the records of one category with deterministic ids
pub fn build_records(store: &KnowledgeStore, category: Category, generation: &str) -> Vec<IndexRecord> {
    match category {
        Category::Services => store
            .get_all_services()
            .iter()
            .enumerate()
            .map(|(i, service)| {
                IndexRecord::new(
                    format!("service_{}", i),
                    render_service(service),
                    EntryMetadata::new(
                        EntryKind::Service {
                            name: service.name().to_string(),
                        },
                        generation,
                    ),
                )
            })
            .collect(),
        Category::Faqs => store
            .get_all_faqs()
            .iter()
            .enumerate()
            .map(|(i, faq)| {
                IndexRecord::new(
                    format!("faq_{}", i),
                    render_faq(faq),
                    EntryMetadata::new(EntryKind::Faq, generation),
                )
            })
            .collect(),
        Category::Company => vec![IndexRecord::new(
            COMPANY_RECORD_ID,
            render_company(store.get_company_info()),
            EntryMetadata::new(EntryKind::CompanyInfo, generation),
        )],
    }
}

/// Replaces every previously indexed entry with freshly rendered records
///
/// Records are tagged with the configured generation. Whatever generation the
/// existing entries carry, they are removed first, so items dropped from the
/// knowledge base disappear from the collections.
pub struct Indexer {
    index: Arc<dyn SemanticIndex>,
    generation: String,
}

impl std::fmt::Debug for Indexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Indexer")
            .field("backend", &self.index.backend_name())
            .field("generation", &self.generation)
            .finish()
    }
}

impl Indexer {
    pub fn new(index: Arc<dyn SemanticIndex>, generation: impl Into<String>) -> Self {
        Self {
            index,
            generation: generation.into(),
        }
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Index every category; any failure aborts with an `Index` error
    pub async fn index_all(&self, store: &KnowledgeStore) -> Result<IndexReport, DomainError> {
        let mut categories = BTreeMap::new();

        for category in Category::ALL {
            let report = self.index_category(store, category).await?;
            categories.insert(category, report);
        }

        let report = IndexReport {
            generation: self.generation.clone(),
            categories,
            completed_at: Utc::now(),
        };

        info!(
            generation = %report.generation,
            services = report.category(Category::Services).indexed,
            faqs = report.category(Category::Faqs).indexed,
            company = report.category(Category::Company).indexed,
            "Knowledge base indexed"
        );

        Ok(report)
    }

    async fn index_category(
        &self,
        store: &KnowledgeStore,
        category: Category,
    ) -> Result<CategoryReport, DomainError> {
        let collection = category.collection_name();
        let as_index_error = |e: DomainError| DomainError::index(collection, e.to_string());

        self.index
            .ensure_collection(collection)
            .await
            .map_err(as_index_error)?;

        let removed = self
            .index
            .delete_where(collection, &MetadataFilter::indexed_entries(category))
            .await
            .map_err(as_index_error)?;

        let records = build_records(store, category, &self.generation);
        if records.is_empty() {
            debug!(collection, removed, "Nothing to index");
            return Ok(CategoryReport { removed, indexed: 0 });
        }

        let indexed = self
            .index
            .upsert(collection, records)
            .await
            .map_err(as_index_error)?;

        debug!(collection, removed, indexed, "Collection indexed");

        Ok(CategoryReport { removed, indexed })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::semantic_index::MockSemanticIndex;
    use crate::domain::KnowledgeDocument;
    use crate::infrastructure::embedding::HashingEmbeddingProvider;
    use crate::infrastructure::semantic_index::InMemorySemanticIndex;

    fn store(faqs: Vec<Faq>) -> KnowledgeStore {
        KnowledgeStore::from_document(KnowledgeDocument {
            services: vec![Service::new(
                "Web Dev",
                "We build sites",
                vec!["SEO".to_string(), "Hosting".to_string()],
            )],
            faqs,
            company_info: CompanyInfo::new(
                "Acme",
                "A tech company.",
                vec!["Trust".to_string(), "Speed".to_string()],
            ),
        })
        .unwrap()
    }

    fn in_memory() -> Arc<dyn SemanticIndex> {
        Arc::new(InMemorySemanticIndex::new(Arc::new(
            HashingEmbeddingProvider::new(64).unwrap(),
        )))
    }

    #[test]
    fn test_render_documents() {
        let store = store(vec![Faq::new("What are your hours?", "9 to 5")]);

        assert_eq!(
            render_service(&store.get_all_services()[0]),
            "Web Dev: We build sites. Features: SEO, Hosting."
        );
        assert_eq!(
            render_faq(&store.get_all_faqs()[0]),
            "Q: What are your hours? A: 9 to 5"
        );
        assert_eq!(
            render_company(store.get_company_info()),
            "Acme: A tech company. Values: Trust, Speed"
        );
    }

    #[test]
    fn test_build_records_ids_and_metadata() {
        let store = store(vec![Faq::new("a", "b"), Faq::new("c", "d")]);

        let services = build_records(&store, Category::Services, "init");
        let faqs = build_records(&store, Category::Faqs, "init");
        let company = build_records(&store, Category::Company, "init");

        assert_eq!(services[0].id, "service_0");
        assert_eq!(
            services[0].metadata.kind,
            EntryKind::Service {
                name: "Web Dev".to_string()
            }
        );
        let faq_ids: Vec<&str> = faqs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(faq_ids, vec!["faq_0", "faq_1"]);
        assert_eq!(company.len(), 1);
        assert_eq!(company[0].id, COMPANY_RECORD_ID);
        assert_eq!(company[0].metadata.generation, "init");
    }

    #[tokio::test]
    async fn test_index_all_counts() {
        let index = in_memory();
        let indexer = Indexer::new(index.clone(), "init");

        let report = indexer
            .index_all(&store(vec![Faq::new("What are your hours?", "9 to 5")]))
            .await
            .unwrap();

        assert_eq!(report.generation, "init");
        assert_eq!(report.category(Category::Services).indexed, 1);
        assert_eq!(report.category(Category::Faqs).indexed, 1);
        assert_eq!(report.category(Category::Company).indexed, 1);
        assert_eq!(report.total_indexed(), 3);
    }

    #[tokio::test]
    async fn test_reindex_replaces_same_generation() {
        let index = in_memory();
        let indexer = Indexer::new(index.clone(), "init");
        let store = store(vec![Faq::new("What are your hours?", "9 to 5")]);

        indexer.index_all(&store).await.unwrap();
        let first = index.records("services").await.unwrap();

        let report = indexer.index_all(&store).await.unwrap();
        let second = index.records("services").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(report.category(Category::Services).removed, 1);
        assert_eq!(index.count("company").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_new_generation_replaces_previous_entries() {
        let index = in_memory();
        let larger = KnowledgeStore::from_value(serde_json::json!({
            "services": [
                {"name": "Svc0", "description": "d", "features": []},
                {"name": "Svc1", "description": "d", "features": []},
                {"name": "Svc2", "description": "d", "features": []}
            ],
            "faqs": [],
            "company_info": {"name": "Acme", "description": "d", "values": []}
        }))
        .unwrap();

        Indexer::new(index.clone(), "v1").index_all(&larger).await.unwrap();
        let report = Indexer::new(index.clone(), "v2")
            .index_all(&store(vec![]))
            .await
            .unwrap();

        assert_eq!(report.category(Category::Services).removed, 3);
        let records = index.records("services").await.unwrap();
        let ids: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.id.as_str(), r.metadata.generation.as_str()))
            .collect();
        assert_eq!(ids, vec![("service_0", "v2")]);
    }

    #[tokio::test]
    async fn test_zero_faqs_is_not_an_error() {
        let index = in_memory();
        let indexer = Indexer::new(index.clone(), "init");

        let report = indexer.index_all(&store(vec![])).await.unwrap();

        assert_eq!(report.category(Category::Faqs), CategoryReport::default());
        assert_eq!(index.count("faqs").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_failure_is_index_error() {
        let mut index = MockSemanticIndex::new();
        index.expect_backend_name().return_const("mock");
        index.expect_ensure_collection().returning(|_| Ok(()));
        index.expect_delete_where().returning(|_, _| Ok(0));
        index
            .expect_upsert()
            .returning(|_, _| Err(DomainError::provider("mock", "embedding unavailable")));

        let indexer = Indexer::new(Arc::new(index), "init");
        let err = indexer.index_all(&store(vec![])).await.unwrap_err();

        assert!(matches!(err, DomainError::Index { ref collection, .. } if collection == "services"));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_collection_failure_is_index_error() {
        let mut index = MockSemanticIndex::new();
        index
            .expect_ensure_collection()
            .returning(|_| Err(DomainError::storage("disk full")));

        let indexer = Indexer::new(Arc::new(index), "init");
        let err = indexer.index_all(&store(vec![])).await.unwrap_err();

        assert!(matches!(err, DomainError::Index { .. }));
    }
}
