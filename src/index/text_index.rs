//! The unit of indexing: normalizer plus inverted and bigram indexes.

use log::trace;

use crate::analysis::normalizer::Normalizer;
use crate::index::bigram::BigramIndex;
use crate::index::inverted::{DocumentId, InvertedIndex};
use crate::index::lifecycle::IndexLifecycle;
use crate::ingest::IngestRecord;
use crate::persistence::snapshot::IndexSnapshot;
use crate::query::{QueryEngine, QueryKind};

/// An inverted index and its bigram companion, kept consistent.
///
/// Every token that enters the inverted index is registered in the bigram
/// index the first time it is seen. The normalizer used for ingestion is
/// kept alongside so queries are normalized the same way.
#[derive(Debug, Clone)]
pub struct TextIndex {
    normalizer: Normalizer,
    inverted: InvertedIndex,
    bigrams: BigramIndex,
    state: IndexLifecycle,
}

impl TextIndex {
    /// Create an empty index.
    pub fn new(normalizer: Normalizer) -> Self {
        TextIndex {
            normalizer,
            inverted: InvertedIndex::new(),
            bigrams: BigramIndex::new(),
            state: IndexLifecycle::Uninitialized.on_startup(false),
        }
    }

    /// Rebuild an index from a loaded snapshot.
    pub fn from_snapshot(normalizer: Normalizer, snapshot: IndexSnapshot) -> Self {
        let (inverted, bigrams) = snapshot.restore();
        TextIndex {
            normalizer,
            inverted,
            bigrams,
            state: IndexLifecycle::Uninitialized.on_startup(true),
        }
    }

    /// Normalize `text` and index it under `id`.
    ///
    /// Returns the number of tokens indexed, duplicates included.
    pub fn add_document(&mut self, id: DocumentId, text: &str) -> usize {
        let tokens = self.normalizer.normalize(text);
        self.add_tokens(id, &tokens);
        tokens.len()
    }

    /// Index an ingested record as `title + " " + body`.
    pub fn add_record(&mut self, record: &IngestRecord) -> usize {
        self.add_document(record.id, &record.text())
    }

    /// Index already-normalized tokens under `id`.
    pub fn add_tokens(&mut self, id: DocumentId, tokens: &[String]) {
        let new_tokens = self.inverted.add_document(id, tokens);
        trace!(
            "Document {id}: {} tokens, {} new to the vocabulary",
            tokens.len(),
            new_tokens.len()
        );
        for token in &new_tokens {
            self.bigrams.index_token(token);
        }
        self.state = self.state.on_ingest();
    }

    /// Evaluate a query against this index. Ids are sorted ascending.
    pub fn evaluate(&self, kind: &QueryKind, text: &str) -> Vec<DocumentId> {
        QueryEngine::new(self).evaluate(kind, text)
    }

    /// Capture the posting sets in their serializable, sorted form.
    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot::capture(&self.inverted, &self.bigrams)
    }

    /// Record that the current contents were written to disk.
    pub fn mark_persisted(&mut self) {
        self.state = self.state.on_persist();
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    pub fn bigrams(&self) -> &BigramIndex {
        &self.bigrams
    }

    pub fn state(&self) -> IndexLifecycle {
        self.state
    }
}

impl Default for TextIndex {
    fn default() -> Self {
        Self::new(Normalizer::default())
    }
}
