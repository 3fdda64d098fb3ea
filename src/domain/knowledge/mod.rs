//! Knowledge domain - Structured business knowledge

mod entity;
mod store;
mod validation;

pub use entity::{CompanyInfo, Faq, KnowledgeDocument, Service};
pub use store::KnowledgeStore;
pub use validation::{validate_knowledge_document, KnowledgeValidationError};
