//! Knowledge base entities as authored in the knowledge source

use serde::{Deserialize, Serialize};

/// A service offered by the business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    name: String,
    description: String,
    features: Vec<String>,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        features: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            features,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Features in authoring order
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Case-insensitive exact match on the service name
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A frequently asked question and its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    question: String,
    answer: String,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Company profile, exactly one per knowledge base
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    name: String,
    description: String,
    values: Vec<String>,
}

impl CompanyInfo {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        values: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Values in authoring order
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Wire shape of the knowledge source document
///
/// All three sections are required; serde rejects a document missing any of
/// them, or an item missing one of its fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeDocument {
    pub services: Vec<Service>,
    pub faqs: Vec<Faq>,
    pub company_info: CompanyInfo,
}
