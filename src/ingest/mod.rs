//! Ingestion adapters.
//!
//! An adapter owns the source format and hands the indexer plain
//! `(id, title, body)` records. The indexer never touches the corpus files.

pub mod reuters;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::inverted::DocumentId;

pub use reuters::ReutersAdapter;

/// One document as produced by an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRecord {
    pub id: DocumentId,
    pub title: String,
    pub body: String,
}

impl IngestRecord {
    pub fn new<T: Into<String>, B: Into<String>>(id: DocumentId, title: T, body: B) -> Self {
        IngestRecord {
            id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// The text that gets indexed: title and body joined by a space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }
}

/// Everything an adapter read in one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestBatch {
    /// Records in a deterministic order.
    pub records: Vec<IngestRecord>,
    /// Number of source units (files) processed.
    pub sources: usize,
}

/// A source of documents to index.
pub trait IngestionAdapter {
    /// Read every record.
    ///
    /// Structural failures, such as a missing source location, are returned
    /// before any record is produced. Records without an identifiable id are
    /// skipped and not counted.
    fn read_batch(&self) -> Result<IngestBatch>;

    /// Short description of the source, for logging.
    fn describe(&self) -> String;
}

/// An adapter over records already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    records: Vec<IngestRecord>,
}

impl MemoryAdapter {
    pub fn new(records: Vec<IngestRecord>) -> Self {
        MemoryAdapter { records }
    }
}

impl IngestionAdapter for MemoryAdapter {
    fn read_batch(&self) -> Result<IngestBatch> {
        Ok(IngestBatch {
            records: self.records.clone(),
            sources: 1,
        })
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_text() {
        let record = IngestRecord::new(1, "Title", "Body text");
        assert_eq!(record.text(), "Title Body text");
        assert_eq!(IngestRecord::new(2, "", "").text(), " ");
    }

    #[test]
    fn test_memory_adapter() {
        let adapter = MemoryAdapter::new(vec![IngestRecord::new(4, "a", "b")]);
        let batch = adapter.read_batch().unwrap();
        assert_eq!(batch.sources, 1);
        assert_eq!(batch.records[0].id, 4);
        assert_eq!(adapter.describe(), "1 in-memory records");
    }
}
