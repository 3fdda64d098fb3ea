//! Knowledge categories and the collections that hold them

use serde::{Deserialize, Serialize};

/// A partition of the semantic index; one collection per category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Services,
    Faqs,
    Company,
}

impl Category {
    /// Every category, in indexing and rendering order
    pub const ALL: [Category; 3] = [Category::Services, Category::Faqs, Category::Company];

    /// Name of the backing collection, also the key in a result bundle
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Faqs => "faqs",
            Self::Company => "company",
        }
    }

    /// Entry type discriminant of the records this category holds
    pub fn entry_type(&self) -> &'static str {
        match self {
            Self::Services => "service",
            Self::Faqs => "faq",
            Self::Company => "company_info",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.collection_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.collection_name()).collect();
        assert_eq!(names, vec!["services", "faqs", "company"]);
    }

    #[test]
    fn test_entry_type_matches_entry_kind() {
        use crate::domain::semantic_index::EntryKind;

        let service = EntryKind::Service {
            name: "Web Dev".to_string(),
        };
        assert_eq!(Category::Services.entry_type(), service.kind());
        assert_eq!(Category::Faqs.entry_type(), EntryKind::Faq.kind());
        assert_eq!(Category::Company.entry_type(), EntryKind::CompanyInfo.kind());
    }

    #[test]
    fn test_serializes_as_collection_name() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.collection_name()));
        }
    }
}
