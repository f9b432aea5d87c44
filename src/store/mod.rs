//! Document storage used to hydrate query results.
//!
//! The index only returns ids. A [`DocumentStore`] maps them back to stored
//! documents; ids with no stored document are dropped from the hydrated
//! result without error.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::inverted::DocumentId;
use crate::ingest::IngestRecord;

pub use memory::MemoryDocumentStore;

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub title: String,
    pub description: String,
}

impl From<&IngestRecord> for StoredDocument {
    fn from(record: &IngestRecord) -> Self {
        StoredDocument {
            id: record.id,
            title: record.title.clone(),
            description: record.body.clone(),
        }
    }
}

/// Storage for documents keyed by id.
pub trait DocumentStore: Send + Sync {
    /// Get a document by id.
    fn get(&self, id: DocumentId) -> Option<StoredDocument>;

    /// Insert or replace a document.
    fn put(&mut self, document: StoredDocument) -> Result<()>;

    /// Number of stored documents.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve ids to documents, keeping the id order and skipping unknown ids.
pub fn hydrate(store: &dyn DocumentStore, ids: &[DocumentId]) -> Vec<StoredDocument> {
    ids.iter().filter_map(|&id| store.get(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hydrate_skips_missing() {
        let mut store = MemoryDocumentStore::new();
        store
            .put(StoredDocument::from(&IngestRecord::new(1, "Wheat", "prices rise")))
            .unwrap();
        store
            .put(StoredDocument::from(&IngestRecord::new(3, "Corn", "exports")))
            .unwrap();

        let documents = hydrate(&store, &[1, 2, 3]);
        let ids: Vec<DocumentId> = documents.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(documents[0].description, "prices rise");
        assert!(hydrate(&store, &[]).is_empty());
    }
}
