use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed or incomplete knowledge source or application configuration
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Collection creation or bulk write failure while indexing
    #[error("Index error: {collection} - {message}")]
    Index { collection: String, message: String },

    /// Embedding or backend failure while serving a query
    #[error("Query error: {collection} - {message}")]
    Query { collection: String, message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn index(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Index {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn query(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            collection: collection.into(),
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Whether the error must stop startup rather than degrade a result
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Index { .. })
    }
}
