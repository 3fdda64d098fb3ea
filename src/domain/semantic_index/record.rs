//! Records stored in and returned from a semantic index

use serde::{Deserialize, Serialize};

/// Metadata key carrying the generation tag
pub const GENERATION_KEY: &str = "generation";

/// Metadata key carrying the entry kind discriminant
pub const KIND_KEY: &str = "type";

/// What a record was derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryKind {
    Service { name: String },
    Faq,
    CompanyInfo,
}

impl EntryKind {
    /// The shared discriminant, as stored under [`KIND_KEY`]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Service { .. } => "service",
            Self::Faq => "faq",
            Self::CompanyInfo => "company_info",
        }
    }
}

/// Record metadata: the entry kind plus the indexing run that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    #[serde(flatten)]
    pub kind: EntryKind,
    pub generation: String,
}

impl EntryMetadata {
    pub fn new(kind: EntryKind, generation: impl Into<String>) -> Self {
        Self {
            kind,
            generation: generation.into(),
        }
    }

    /// Flat key-value view used for metadata filtering
    pub fn to_map(&self) -> serde_json::Map<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => serde_json::Map::new(),
        }
    }
}

/// A document to be embedded and stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub document: String,
    pub metadata: EntryMetadata,
}

impl IndexRecord {
    pub fn new(id: impl Into<String>, document: impl Into<String>, metadata: EntryMetadata) -> Self {
        Self {
            id: id.into(),
            document: document.into(),
            metadata,
        }
    }
}

/// A nearest-neighbor match; smaller distance is more similar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryHit {
    pub id: String,
    pub document: String,
    pub metadata: EntryMetadata,
    pub distance: f32,
}
