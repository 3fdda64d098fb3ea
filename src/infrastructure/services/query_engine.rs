//! Query engine - Per-category similarity lookups with graceful degradation

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::semantic_index::Category;
use crate::domain::{DomainError, QueryHit, SemanticIndex};

/// The company collection holds a single profile
pub const COMPANY_RESULT_CAP: usize = 1;

/// Hits per category, each ordered by ascending distance
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResultBundle {
    pub services: Vec<QueryHit>,
    pub faqs: Vec<QueryHit>,
    pub company: Vec<QueryHit>,
}

impl QueryResultBundle {
    pub fn category(&self, category: Category) -> &[QueryHit] {
        match category {
            Category::Services => &self.services,
            Category::Faqs => &self.faqs,
            Category::Company => &self.company,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty() && self.faqs.is_empty() && self.company.is_empty()
    }
}

/// Runs one bounded lookup per category, never merging them
pub struct QueryEngine {
    index: Arc<dyn SemanticIndex>,
    timeout: Duration,
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("backend", &self.index.backend_name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl QueryEngine {
    pub fn new(index: Arc<dyn SemanticIndex>, timeout: Duration) -> Self {
        Self { index, timeout }
    }

    /// Up to `n_results` hits per category; company is capped at one
    ///
    /// A failing or slow category comes back empty instead of failing the
    /// whole query.
    pub async fn query(&self, text: &str, n_results: usize) -> QueryResultBundle {
        let (services, faqs, company) = futures::join!(
            self.lookup(Category::Services, text, n_results),
            self.lookup(Category::Faqs, text, n_results),
            self.lookup(Category::Company, text, n_results.min(COMPANY_RESULT_CAP)),
        );

        debug!(
            services = services.len(),
            faqs = faqs.len(),
            company = company.len(),
            "Query completed"
        );

        QueryResultBundle {
            services,
            faqs,
            company,
        }
    }

    async fn lookup(&self, category: Category, text: &str, top_k: usize) -> Vec<QueryHit> {
        match self.try_lookup(category, text, top_k).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(category = %category, error = %e, "Category lookup degraded to empty");
                Vec::new()
            }
        }
    }

    async fn try_lookup(
        &self,
        category: Category,
        text: &str,
        top_k: usize,
    ) -> Result<Vec<QueryHit>, DomainError> {
        let collection = category.collection_name();

        let mut hits = tokio::time::timeout(self.timeout, self.index.query(collection, text, top_k))
            .await
            .map_err(|_| {
                DomainError::query(
                    collection,
                    format!("Lookup timed out after {} ms", self.timeout.as_millis()),
                )
            })?
            .map_err(|e| DomainError::query(collection, e.to_string()))?;

        // Backends are trusted for order, not for bounds
        hits.truncate(top_k);

        Ok(hits)
    }
}
