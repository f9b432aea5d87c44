//! The search engine handle.
//!
//! [`SearchEngine`] owns the live [`TextIndex`] and is the only thing the
//! outer layers (CLI, a web handler) hold on to. Queries take a cheap `Arc`
//! clone of the current index and run without holding any lock. A rebuild
//! indexes into a fresh `TextIndex` off to the side and swaps it in under a
//! short write lock, so readers always see a complete index.

use std::sync::Arc;
use std::time::Instant;

use log::{info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::index::inverted::DocumentId;
use crate::index::lifecycle::IndexLifecycle;
use crate::index::text_index::TextIndex;
use crate::ingest::IngestionAdapter;
use crate::persistence::files::SnapshotFiles;
use crate::query::{ParsedQuery, QueryKind};
use crate::store::{DocumentStore, StoredDocument, hydrate};

/// Counts reported by a rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildReport {
    /// Source units read by the adapter.
    pub files_processed: usize,
    /// Records indexed.
    pub documents_indexed: usize,
    /// Distinct tokens in the new index.
    pub vocabulary_size: usize,
    /// Distinct bigrams in the new index.
    pub bigram_count: usize,
    /// Wall time of the rebuild.
    pub duration_ms: u64,
}

/// Size and state of the live index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub vocabulary_size: usize,
    pub bigram_count: usize,
    pub document_count: usize,
    pub state: IndexLifecycle,
    /// The live index holds changes no snapshot has.
    pub unsaved_changes: bool,
}

/// The published index and its lifecycle state.
///
/// The state lives beside the `Arc` so that marking the index persisted
/// never touches the shared index itself.
struct LiveIndex {
    index: Arc<TextIndex>,
    state: IndexLifecycle,
}

impl LiveIndex {
    fn new(index: TextIndex) -> Self {
        LiveIndex {
            state: index.state(),
            index: Arc::new(index),
        }
    }
}

/// Explicit handle to the live index.
pub struct SearchEngine {
    normalizer: Normalizer,
    snapshot_files: SnapshotFiles,
    current: RwLock<LiveIndex>,
}

impl SearchEngine {
    /// Open an engine, loading the persisted snapshot if there is a usable one.
    ///
    /// Missing or corrupt snapshot files leave the engine with an empty
    /// index; this never fails.
    pub fn open(config: &EngineConfig) -> Self {
        let normalizer = config.normalizer();
        let snapshot_files = config.snapshot_files();

        let index = match snapshot_files.load_or_empty() {
            Some(snapshot) => TextIndex::from_snapshot(normalizer.clone(), snapshot),
            None => {
                info!("No usable index snapshot, starting with an empty index");
                TextIndex::new(normalizer.clone())
            }
        };

        Self::with_index(normalizer, snapshot_files, index)
    }

    /// Wrap an existing index.
    pub fn with_index(
        normalizer: Normalizer,
        snapshot_files: SnapshotFiles,
        index: TextIndex,
    ) -> Self {
        SearchEngine {
            normalizer,
            snapshot_files,
            current: RwLock::new(LiveIndex::new(index)),
        }
    }

    /// The live index. Later swaps do not affect the returned `Arc`.
    pub fn index(&self) -> Arc<TextIndex> {
        Arc::clone(&self.current.read().index)
    }

    /// Evaluate a query of the given kind against the live index.
    pub fn evaluate(&self, kind: &QueryKind, text: &str) -> Vec<DocumentId> {
        self.index().evaluate(kind, text)
    }

    /// Parse and evaluate a `<tag> <text>` query line.
    pub fn search(&self, line: &str) -> Result<Vec<DocumentId>> {
        let query = ParsedQuery::parse(line)?;
        Ok(self.evaluate(&query.kind, &query.text))
    }

    /// Parse and evaluate a query line, then hydrate the hits from `store`.
    ///
    /// Hits without a stored document are dropped.
    pub fn search_documents(
        &self,
        line: &str,
        store: &dyn DocumentStore,
    ) -> Result<Vec<StoredDocument>> {
        let ids = self.search(line)?;
        Ok(hydrate(store, &ids))
    }

    /// Rebuild the index from scratch and swap it in.
    ///
    /// Every record from `adapter` is indexed into a new index, upserted into
    /// `store` when one is given, and the snapshot is written. If the adapter
    /// fails nothing changes. If writing the snapshot fails the new index is
    /// still swapped in and stays queryable, and the error is returned.
    pub fn rebuild(
        &self,
        adapter: &dyn IngestionAdapter,
        mut store: Option<&mut dyn DocumentStore>,
    ) -> Result<RebuildReport> {
        let start = Instant::now();
        info!("Rebuilding index from {}", adapter.describe());
        let batch = adapter.read_batch()?;

        let mut index = TextIndex::new(self.normalizer.clone());
        for record in &batch.records {
            index.add_record(record);
            if let Some(store) = store.as_deref_mut() {
                store.put(StoredDocument::from(record))?;
            }
        }

        let saved = self.snapshot_files.save(&index.snapshot());
        if saved.is_ok() {
            index.mark_persisted();
        }

        let report = RebuildReport {
            files_processed: batch.sources,
            documents_indexed: batch.records.len(),
            vocabulary_size: index.inverted().vocabulary_size(),
            bigram_count: index.bigrams().len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        *self.current.write() = LiveIndex::new(index);
        info!(
            "Indexed {} documents from {} files: {} words, {} bigrams",
            report.documents_indexed,
            report.files_processed,
            report.vocabulary_size,
            report.bigram_count
        );

        if let Err(e) = saved {
            warn!("Index rebuilt but snapshot not written: {e}");
            return Err(e);
        }
        Ok(report)
    }

    /// Write the live index to the snapshot files.
    ///
    /// Serialization and I/O run without the lock. If a rebuild swapped in
    /// another index meanwhile, the state of that index is left alone.
    pub fn persist(&self) -> Result<()> {
        let index = self.index();
        self.snapshot_files.save(&index.snapshot())?;

        let mut live = self.current.write();
        if Arc::ptr_eq(&live.index, &index) {
            live.state = live.state.on_persist();
        }
        Ok(())
    }

    /// Size and state of the live index.
    pub fn stats(&self) -> IndexStats {
        let (index, state) = {
            let live = self.current.read();
            (Arc::clone(&live.index), live.state)
        };
        IndexStats {
            vocabulary_size: index.inverted().vocabulary_size(),
            bigram_count: index.bigrams().len(),
            document_count: index.inverted().document_count(),
            state,
            unsaved_changes: state.is_dirty(),
        }
    }

    pub fn snapshot_files(&self) -> &SnapshotFiles {
        &self.snapshot_files
    }
}
