//! Semantic index domain - Per-category vector collections

mod collection;
mod filter;
mod provider;
mod record;

pub use collection::Category;
pub use filter::{FilterCondition, FilterOperator, MetadataFilter};
pub use provider::SemanticIndex;
pub use record::{EntryKind, EntryMetadata, IndexRecord, QueryHit, GENERATION_KEY, KIND_KEY};

#[cfg(test)]
pub use provider::MockSemanticIndex;
