//! Metadata filtering for bulk deletes

use super::collection::Category;
use super::record::{GENERATION_KEY, KIND_KEY};

/// Comparison operators for metadata filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Equal to
    Eq,
    /// Field is present
    Exists,
}

/// A single filter condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCondition {
    pub key: String,
    pub operator: FilterOperator,
    /// Absent for `Exists`
    pub value: Option<String>,
}

impl FilterCondition {
    pub fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: FilterOperator::Eq,
            value: Some(value.into()),
        }
    }

    pub fn exists(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: FilterOperator::Exists,
            value: None,
        }
    }
}

/// A single condition or a conjunction of filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataFilter {
    Condition(FilterCondition),
    All(Vec<MetadataFilter>),
}

impl MetadataFilter {
    pub fn condition(condition: FilterCondition) -> Self {
        Self::Condition(condition)
    }

    pub fn all(filters: Vec<MetadataFilter>) -> Self {
        Self::All(filters)
    }

    /// Every entry the indexer wrote for a category, whatever its generation
    pub fn indexed_entries(category: Category) -> Self {
        Self::all(vec![
            Self::condition(FilterCondition::eq(KIND_KEY, category.entry_type())),
            Self::condition(FilterCondition::exists(GENERATION_KEY)),
        ])
    }
}
