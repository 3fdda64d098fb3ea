//! Semantic index provider trait

use async_trait::async_trait;

use super::filter::MetadataFilter;
use super::record::{IndexRecord, QueryHit};
use crate::domain::embedding::DistanceMetric;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Named collections of embedded documents
///
/// Implementations own the embedding step: records go in as text and
/// queries come in as text. Errors are reported as `Provider` or `Storage`;
/// callers decide whether a failure is fatal.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SemanticIndex: Send + Sync {
    /// Get the backend name
    fn backend_name(&self) -> &'static str;

    /// Metric used to rank query results
    fn distance_metric(&self) -> DistanceMetric;

    /// Create the collection if it does not exist yet
    async fn ensure_collection(&self, collection: &str) -> Result<(), DomainError>;

    /// Embed and store records, replacing any existing record with the same id
    async fn upsert(&self, collection: &str, records: Vec<IndexRecord>) -> Result<usize, DomainError>;

    /// Delete every record whose metadata matches the filter
    async fn delete_where(
        &self,
        collection: &str,
        filter: &MetadataFilter,
    ) -> Result<usize, DomainError>;

    /// Up to `top_k` nearest records to `text`, ascending distance
    async fn query(
        &self,
        collection: &str,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<QueryHit>, DomainError>;

    /// Number of records in the collection
    async fn count(&self, collection: &str) -> Result<usize, DomainError>;

    /// All records in insertion order, without embeddings
    async fn records(&self, collection: &str) -> Result<Vec<IndexRecord>, DomainError>;
}
