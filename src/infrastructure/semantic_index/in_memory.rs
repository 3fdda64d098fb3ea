//! In-memory semantic index with optional on-disk snapshots

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::snapshot::{SnapshotStore, StoredEntry};
use crate::domain::semantic_index::{
    FilterCondition, FilterOperator, IndexRecord, MetadataFilter, QueryHit, SemanticIndex,
};
use crate::domain::{DistanceMetric, DomainError, EmbeddingProvider};

/// Linear-scan semantic index
///
/// Suitable for knowledge bases of a few thousand entries. With a snapshot
/// directory every mutation rewrites `<dir>/<collection>.json` and a
/// collection is reloaded from it the first time it is ensured.
pub struct InMemorySemanticIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    metric: DistanceMetric,
    collections: RwLock<HashMap<String, Vec<StoredEntry>>>,
    snapshots: Option<SnapshotStore>,
}

impl std::fmt::Debug for InMemorySemanticIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySemanticIndex")
            .field("embedder", &self.embedder.provider_name())
            .field("metric", &self.metric)
            .field("snapshots", &self.snapshots.as_ref().map(|s| s.dir()))
            .finish()
    }
}

impl InMemorySemanticIndex {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            metric: DistanceMetric::default(),
            collections: RwLock::new(HashMap::new()),
            snapshots: None,
        }
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Persist collections as JSON snapshots under `dir`
    pub fn with_persistence(mut self, dir: impl Into<PathBuf>) -> Self {
        self.snapshots = Some(SnapshotStore::new(
            dir,
            self.embedder.provider_name(),
            self.embedder.model(),
            self.embedder.dimensions(),
        ));
        self
    }

    async fn persist(&self, collection: &str, entries: &[StoredEntry]) -> Result<(), DomainError> {
        match &self.snapshots {
            Some(snapshots) => snapshots.save(collection, entries).await,
            None => Ok(()),
        }
    }
}

fn missing_collection(collection: &str) -> DomainError {
    DomainError::storage(format!("Collection '{}' does not exist", collection))
}

fn validate_collection_name(collection: &str) -> Result<(), DomainError> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(DomainError::storage(format!(
            "Invalid collection name '{}'",
            collection
        )))
    }
}

#[async_trait]
impl SemanticIndex for InMemorySemanticIndex {
    fn backend_name(&self) -> &'static str {
        "in_memory"
    }

    fn distance_metric(&self) -> DistanceMetric {
        self.metric
    }

    async fn ensure_collection(&self, collection: &str) -> Result<(), DomainError> {
        validate_collection_name(collection)?;

        let mut collections = self.collections.write().await;
        if collections.contains_key(collection) {
            return Ok(());
        }

        let entries = match &self.snapshots {
            Some(snapshots) => snapshots.load(collection).await?,
            None => Vec::new(),
        };

        debug!(collection, restored = entries.len(), "Collection opened");
        collections.insert(collection.to_string(), entries);

        Ok(())
    }

    async fn upsert(&self, collection: &str, records: Vec<IndexRecord>) -> Result<usize, DomainError> {
        if !self.collections.read().await.contains_key(collection) {
            return Err(missing_collection(collection));
        }

        if records.is_empty() {
            return Ok(0);
        }

        let documents: Vec<String> = records.iter().map(|r| r.document.clone()).collect();
        let embeddings = self.embedder.embed(documents).await?;

        if embeddings.len() != records.len() {
            return Err(DomainError::provider(
                self.embedder.provider_name(),
                format!(
                    "Expected {} embeddings, received {}",
                    records.len(),
                    embeddings.len()
                ),
            ));
        }

        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        let count = records.len();
        for (record, embedding) in records.into_iter().zip(embeddings) {
            let entry = StoredEntry { record, embedding };
            match entries.iter_mut().find(|e| e.record.id == entry.record.id) {
                Some(existing) => *existing = entry,
                None => entries.push(entry),
            }
        }

        self.persist(collection, entries).await?;

        Ok(count)
    }

    async fn delete_where(
        &self,
        collection: &str,
        filter: &MetadataFilter,
    ) -> Result<usize, DomainError> {
        let mut collections = self.collections.write().await;
        let entries = collections
            .get_mut(collection)
            .ok_or_else(|| missing_collection(collection))?;

        let before = entries.len();
        entries.retain(|entry| !matches_filter(&entry.record, filter));
        let deleted = before - entries.len();

        if deleted > 0 {
            self.persist(collection, entries).await?;
        }

        Ok(deleted)
    }

    async fn query(
        &self,
        collection: &str,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<QueryHit>, DomainError> {
        {
            let collections = self.collections.read().await;
            let entries = collections
                .get(collection)
                .ok_or_else(|| missing_collection(collection))?;

            if top_k == 0 || entries.is_empty() {
                return Ok(Vec::new());
            }
        }

        let query_vector = crate::domain::embed_one(self.embedder.as_ref(), text).await?;

        let collections = self.collections.read().await;
        let entries = collections
            .get(collection)
            .ok_or_else(|| missing_collection(collection))?;

        let mut hits: Vec<QueryHit> = entries
            .iter()
            .map(|entry| QueryHit {
                id: entry.record.id.clone(),
                document: entry.record.document.clone(),
                metadata: entry.record.metadata.clone(),
                distance: self.metric.distance(&query_vector, &entry.embedding),
            })
            .collect();

        // Stable: equal distances keep insertion order
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);

        Ok(hits)
    }

    async fn count(&self, collection: &str) -> Result<usize, DomainError> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|entries| entries.len())
            .ok_or_else(|| missing_collection(collection))
    }

    async fn records(&self, collection: &str) -> Result<Vec<IndexRecord>, DomainError> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|entries| entries.iter().map(|e| e.record.clone()).collect())
            .ok_or_else(|| missing_collection(collection))
    }
}

/// Check if a record matches a metadata filter
fn matches_filter(record: &IndexRecord, filter: &MetadataFilter) -> bool {
    let metadata = record.metadata.to_map();
    matches_map(&metadata, filter)
}

fn matches_map(
    metadata: &serde_json::Map<String, serde_json::Value>,
    filter: &MetadataFilter,
) -> bool {
    match filter {
        MetadataFilter::Condition(condition) => matches_condition(metadata, condition),
        MetadataFilter::All(filters) => filters.iter().all(|f| matches_map(metadata, f)),
    }
}

/// Check if metadata matches a filter condition
fn matches_condition(
    metadata: &serde_json::Map<String, serde_json::Value>,
    condition: &FilterCondition,
) -> bool {
    let value = metadata.get(&condition.key);

    match condition.operator {
        FilterOperator::Eq => condition
            .value
            .as_deref()
            .is_some_and(|expected| compare_eq(value, expected)),
        FilterOperator::Exists => value.is_some(),
    }
}

/// Metadata values are compared as strings
fn compare_eq(value: Option<&serde_json::Value>, expected: &str) -> bool {
    matches!(value, Some(serde_json::Value::String(s)) if s == expected)
}
