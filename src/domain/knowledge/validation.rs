//! Load-time validation of a knowledge document

use std::collections::HashSet;

use thiserror::Error;

use super::entity::KnowledgeDocument;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnowledgeValidationError {
    #[error("service #{index} has an empty name")]
    EmptyServiceName { index: usize },

    #[error("service name '{name}' is defined more than once (names are case-insensitive)")]
    DuplicateServiceName { name: String },

    #[error("company_info has an empty name")]
    EmptyCompanyName,
}

/// Validate invariants serde cannot express
pub fn validate_knowledge_document(
    document: &KnowledgeDocument,
) -> Result<(), KnowledgeValidationError> {
    let mut seen = HashSet::new();

    for (index, service) in document.services.iter().enumerate() {
        let name = service.name().trim();

        if name.is_empty() {
            return Err(KnowledgeValidationError::EmptyServiceName { index });
        }

        if !seen.insert(name.to_lowercase()) {
            return Err(KnowledgeValidationError::DuplicateServiceName {
                name: service.name().to_string(),
            });
        }
    }

    if document.company_info.name().trim().is_empty() {
        return Err(KnowledgeValidationError::EmptyCompanyName);
    }

    Ok(())
}
