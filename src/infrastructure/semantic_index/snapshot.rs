//! On-disk snapshots of semantic index collections

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::semantic_index::IndexRecord;
use crate::domain::DomainError;

/// A record together with its embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct StoredEntry {
    pub record: IndexRecord,
    pub embedding: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    collection: String,
    embedding_provider: String,
    #[serde(default)]
    embedding_model: String,
    dimensions: usize,
    entries: Vec<StoredEntry>,
}

/// Writes one JSON file per collection under a directory
#[derive(Debug, Clone)]
pub(crate) struct SnapshotStore {
    dir: PathBuf,
    embedding_provider: &'static str,
    embedding_model: String,
    dimensions: usize,
}

impl SnapshotStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        embedding_provider: &'static str,
        embedding_model: impl Into<String>,
        dimensions: usize,
    ) -> Self {
        Self {
            dir: dir.into(),
            embedding_provider,
            embedding_model: embedding_model.into(),
            dimensions,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }

    /// Entries of a previous run, or nothing if absent or built by another embedder
    pub async fn load(&self, collection: &str) -> Result<Vec<StoredEntry>, DomainError> {
        let path = self.path_for(collection);

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(DomainError::storage(format!(
                    "Failed to read snapshot '{}': {}",
                    path.display(),
                    e
                )))
            }
        };

        let snapshot: Snapshot = serde_json::from_slice(&raw).map_err(|e| {
            DomainError::storage(format!(
                "Corrupt snapshot '{}': {}",
                path.display(),
                e
            ))
        })?;

        if snapshot.embedding_provider != self.embedding_provider
            || snapshot.embedding_model != self.embedding_model
            || snapshot.dimensions != self.dimensions
        {
            warn!(
                collection,
                snapshot_provider = %snapshot.embedding_provider,
                snapshot_model = %snapshot.embedding_model,
                snapshot_dimensions = snapshot.dimensions,
                "Discarding snapshot built with a different embedder"
            );
            return Ok(Vec::new());
        }

        debug!(collection, entries = snapshot.entries.len(), "Snapshot loaded");

        Ok(snapshot.entries)
    }

    pub async fn save(&self, collection: &str, entries: &[StoredEntry]) -> Result<(), DomainError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to create snapshot directory '{}': {}",
                self.dir.display(),
                e
            ))
        })?;

        let snapshot = Snapshot {
            collection: collection.to_string(),
            embedding_provider: self.embedding_provider.to_string(),
            embedding_model: self.embedding_model.clone(),
            dimensions: self.dimensions,
            entries: entries.to_vec(),
        };

        let raw = serde_json::to_vec(&snapshot)
            .map_err(|e| DomainError::storage(format!("Failed to encode snapshot: {}", e)))?;

        // Written beside the target, then renamed over it
        let path = self.path_for(collection);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, raw).await.map_err(|e| {
            DomainError::storage(format!("Failed to write snapshot '{}': {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| {
            DomainError::storage(format!(
                "Failed to replace snapshot '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::semantic_index::{EntryKind, EntryMetadata};

    fn entry(id: &str) -> StoredEntry {
        StoredEntry {
            record: IndexRecord::new(id, "doc", EntryMetadata::new(EntryKind::Faq, "init")),
            embedding: vec![1.0, 0.0],
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "hashing", "v1", 2);

        store.save("faqs", &[entry("faq_0"), entry("faq_1")]).await.unwrap();
        let loaded = store.load("faqs").await.unwrap();

        let ids: Vec<&str> = loaded.iter().map(|e| e.record.id.as_str()).collect();
        assert_eq!(ids, vec!["faq_0", "faq_1"]);
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path(), "hashing", "v1", 2);

        assert!(store.load("services").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_embedder_snapshot_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        SnapshotStore::new(dir.path(), "hashing", "v1", 2)
            .save("faqs", &[entry("faq_0")])
            .await
            .unwrap();

        let loaded = SnapshotStore::new(dir.path(), "openai", "text-embedding-3-small", 1536)
            .load("faqs")
            .await
            .unwrap();

        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_other_model_of_same_width_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        SnapshotStore::new(dir.path(), "openai", "text-embedding-3-small", 1536)
            .save("faqs", &[entry("faq_0")])
            .await
            .unwrap();

        let same = SnapshotStore::new(dir.path(), "openai", "text-embedding-3-small", 1536)
            .load("faqs")
            .await
            .unwrap();
        let other = SnapshotStore::new(dir.path(), "openai", "text-embedding-ada-002", 1536)
            .load("faqs")
            .await
            .unwrap();

        assert_eq!(same.len(), 1);
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("faqs.json"), b"not json").unwrap();
        let store = SnapshotStore::new(dir.path(), "hashing", "v1", 2);

        let err = store.load("faqs").await.unwrap_err();

        assert!(matches!(err, DomainError::Storage { .. }));
    }
}
