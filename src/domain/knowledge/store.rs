//! Read-only holder of the loaded knowledge base

use std::path::Path;

use tracing::info;

use super::entity::{CompanyInfo, Faq, KnowledgeDocument, Service};
use super::validation::validate_knowledge_document;
use crate::domain::DomainError;

/// Structured knowledge base, immutable once loaded
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    services: Vec<Service>,
    faqs: Vec<Faq>,
    company_info: CompanyInfo,
}

impl KnowledgeStore {
    /// Load the knowledge base from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DomainError::config(format!(
                "Failed to read knowledge source '{}': {}",
                path.display(),
                e
            ))
        })?;

        let store = Self::from_json_str(&raw)?;

        info!(
            path = %path.display(),
            services = store.services.len(),
            faqs = store.faqs.len(),
            "Knowledge base loaded"
        );

        Ok(store)
    }

    /// Parse the knowledge base from a JSON string
    pub fn from_json_str(raw: &str) -> Result<Self, DomainError> {
        let document: KnowledgeDocument = serde_json::from_str(raw)
            .map_err(|e| DomainError::config(format!("Malformed knowledge source: {}", e)))?;

        Self::from_document(document)
    }

    /// Build the knowledge base from an already parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, DomainError> {
        let document: KnowledgeDocument = serde_json::from_value(value)
            .map_err(|e| DomainError::config(format!("Malformed knowledge source: {}", e)))?;

        Self::from_document(document)
    }

    /// Build the knowledge base from typed sections
    pub fn from_document(document: KnowledgeDocument) -> Result<Self, DomainError> {
        validate_knowledge_document(&document)
            .map_err(|e| DomainError::config(format!("Invalid knowledge source: {}", e)))?;

        Ok(Self {
            services: document.services,
            faqs: document.faqs,
            company_info: document.company_info,
        })
    }

    /// Case-insensitive exact lookup; a miss is an expected outcome
    pub fn get_service_by_name(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|service| service.matches_name(name))
    }

    pub fn get_all_services(&self) -> &[Service] {
        &self.services
    }

    pub fn get_all_faqs(&self) -> &[Faq] {
        &self.faqs
    }

    pub fn get_company_info(&self) -> &CompanyInfo {
        &self.company_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "services": [
            {"name": "Web Dev", "description": "We build sites", "features": ["SEO", "Hosting"]},
            {"name": "Cloud Migration", "description": "We move you to the cloud", "features": ["AWS"]}
        ],
        "faqs": [{"question": "What are your hours?", "answer": "9 to 5"}],
        "company_info": {"name": "Acme", "description": "A tech company", "values": ["Trust"]}
    }"#;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let store = KnowledgeStore::from_json_str(SAMPLE).unwrap();

        let lower = store.get_service_by_name("web dev").unwrap();
        let upper = store.get_service_by_name("WEB DEV").unwrap();

        assert_eq!(lower, upper);
        assert_eq!(lower.name(), "Web Dev");
        assert!(store.get_service_by_name("nonexistent").is_none());
    }

    #[test]
    fn test_lookup_is_not_fuzzy() {
        let store = KnowledgeStore::from_json_str(SAMPLE).unwrap();

        assert!(store.get_service_by_name("Web").is_none());
        assert!(store.get_service_by_name("cloud").is_none());
    }

    #[test]
    fn test_accessors_preserve_order() {
        let store = KnowledgeStore::from_json_str(SAMPLE).unwrap();

        let names: Vec<&str> = store.get_all_services().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Web Dev", "Cloud Migration"]);
        assert_eq!(store.get_all_faqs().len(), 1);
        assert_eq!(store.get_company_info().name(), "Acme");
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let raw = r#"{"services": [], "faqs": []}"#;

        let err = KnowledgeStore::from_json_str(raw).unwrap_err();

        assert!(matches!(err, DomainError::Config { .. }));
        assert!(err.to_string().contains("company_info"));
    }

    #[test]
    fn test_malformed_service_is_config_error() {
        let value = serde_json::json!({
            "services": [{"name": "Web Dev", "features": []}],
            "faqs": [],
            "company_info": {"name": "Acme", "description": "d", "values": []}
        });

        let err = KnowledgeStore::from_value(value).unwrap_err();

        assert!(matches!(err, DomainError::Config { .. }));
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_duplicate_service_is_config_error() {
        let value = serde_json::json!({
            "services": [
                {"name": "Web Dev", "description": "a", "features": []},
                {"name": "web dev", "description": "b", "features": []}
            ],
            "faqs": [],
            "company_info": {"name": "Acme", "description": "d", "values": []}
        });

        let err = KnowledgeStore::from_value(value).unwrap_err();

        assert!(matches!(err, DomainError::Config { .. }));
    }

    #[test]
    fn test_empty_faqs_are_valid() {
        let value = serde_json::json!({
            "services": [],
            "faqs": [],
            "company_info": {"name": "Acme", "description": "d", "values": []}
        });

        let store = KnowledgeStore::from_value(value).unwrap();

        assert!(store.get_all_faqs().is_empty());
        assert!(store.get_all_services().is_empty());
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = KnowledgeStore::from_path(file.path()).unwrap();

        assert_eq!(store.get_all_services().len(), 2);
    }

    #[test]
    fn test_from_missing_path_is_config_error() {
        let err = KnowledgeStore::from_path("/definitely/not/here.json").unwrap_err();

        assert!(matches!(err, DomainError::Config { .. }));
    }
}
