//! Domain layer - Knowledge model, embedding and index abstractions

pub mod embedding;
pub mod error;
pub mod knowledge;
pub mod semantic_index;

pub use embedding::{cosine_similarity, embed_one, DistanceMetric, EmbeddingProvider};
pub use error::DomainError;
pub use knowledge::{CompanyInfo, Faq, KnowledgeDocument, KnowledgeStore, Service};
pub use semantic_index::{
    Category, EntryKind, EntryMetadata, FilterCondition, IndexRecord, MetadataFilter, QueryHit,
    SemanticIndex,
};
