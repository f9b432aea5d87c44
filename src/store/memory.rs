//! In-memory document store with a JSON file form.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::error::{Result, TalaashError};
use crate::index::inverted::DocumentId;
use crate::store::{DocumentStore, StoredDocument};

pub const DOCUMENTS_FILE: &str = "documents.json";

/// Documents held in a sorted map. Saved as a JSON array ordered by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: BTreeMap<DocumentId, StoredDocument>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store saved by [`MemoryDocumentStore::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let documents: Vec<StoredDocument> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| {
                TalaashError::storage(format!("Failed to parse {}: {e}", path.display()))
            })?;
        info!("Loaded {} documents from {}", documents.len(), path.display());
        Ok(MemoryDocumentStore {
            documents: documents.into_iter().map(|doc| (doc.id, doc)).collect(),
        })
    }

    /// Load a store, or start empty if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write the store as pretty JSON, replacing the file atomically.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&temp_path)?);
        let documents: Vec<&StoredDocument> = self.documents.values().collect();
        serde_json::to_writer_pretty(&mut writer, &documents)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        fs::rename(&temp_path, path)?;
        info!("Saved {} documents to {}", self.documents.len(), path.display());
        Ok(())
    }

    /// Iterate over documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredDocument> {
        self.documents.values()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, id: DocumentId) -> Option<StoredDocument> {
        self.documents.get(&id).cloned()
    }

    fn put(&mut self, document: StoredDocument) -> Result<()> {
        self.documents.insert(document.id, document);
        Ok(())
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn document(id: DocumentId, title: &str) -> StoredDocument {
        StoredDocument {
            id,
            title: title.to_string(),
            description: format!("{title} body"),
        }
    }

    #[test]
    fn test_put_replaces() {
        let mut store = MemoryDocumentStore::new();
        assert!(store.is_empty());
        store.put(document(1, "first")).unwrap();
        store.put(document(1, "second")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().title, "second");
        assert!(store.get(2).is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join(DOCUMENTS_FILE);

        let mut store = MemoryDocumentStore::new();
        store.put(document(9, "nine")).unwrap();
        store.put(document(2, "two")).unwrap();
        store.save(&path).unwrap();

        let loaded = MemoryDocumentStore::load(&path).unwrap();
        let ids: Vec<DocumentId> = loaded.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2, 9]);
        assert_eq!(loaded.get(9), Some(document(9, "nine")));
    }

    #[test]
    fn test_load_or_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DOCUMENTS_FILE);
        assert!(MemoryDocumentStore::load_or_default(&path).unwrap().is_empty());

        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            MemoryDocumentStore::load_or_default(&path),
            Err(TalaashError::Storage(_))
        ));
    }
}
