//! Inverted index: token to posting list.
//!
//! Postings are plain sets of document ids. There is no term frequency, no
//! positions and no deletion; adding a document only ever grows the sets.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Externally assigned document identifier.
pub type DocumentId = u64;

/// The set of documents containing a token.
pub type PostingList = AHashSet<DocumentId>;

/// Token counts recorded for a document at ingestion time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocStats {
    /// Number of tokens after normalization, duplicates included.
    pub total_tokens: usize,
    /// Number of distinct tokens.
    pub unique_tokens: usize,
}

/// Maps each token to the documents it occurs in.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: AHashMap<String, PostingList>,
    doc_stats: AHashMap<DocumentId, DocStats>,
}

impl InvertedIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an index from posting sets, e.g. after loading a snapshot.
    ///
    /// Document statistics are not part of a snapshot and start out empty.
    pub fn from_postings(postings: AHashMap<String, PostingList>) -> Self {
        InvertedIndex {
            postings,
            doc_stats: AHashMap::new(),
        }
    }

    /// Add a document's tokens to the index.
    ///
    /// Inserting an id that is already in a token's posting list is a no-op.
    /// Stats for `id` are overwritten. Postings recorded by an earlier call
    /// for the same id are kept even if the new tokens no longer contain them.
    ///
    /// Returns the tokens that were not in the vocabulary before this call,
    /// in first-occurrence order and without duplicates.
    pub fn add_document(&mut self, id: DocumentId, tokens: &[String]) -> Vec<String> {
        let mut distinct: AHashSet<&str> = AHashSet::with_capacity(tokens.len());
        let mut new_tokens = Vec::new();

        for token in tokens {
            if !distinct.insert(token.as_str()) {
                continue;
            }
            match self.postings.get_mut(token) {
                Some(docs) => {
                    docs.insert(id);
                }
                None => {
                    let mut docs = PostingList::new();
                    docs.insert(id);
                    self.postings.insert(token.clone(), docs);
                    new_tokens.push(token.clone());
                }
            }
        }

        self.doc_stats.insert(
            id,
            DocStats {
                total_tokens: tokens.len(),
                unique_tokens: distinct.len(),
            },
        );

        new_tokens
    }

    /// Get the posting list for a token, if the token is indexed.
    pub fn postings(&self, token: &str) -> Option<&PostingList> {
        self.postings.get(token)
    }

    /// Get the documents containing a token, sorted ascending.
    ///
    /// Unknown tokens yield an empty list.
    pub fn lookup(&self, token: &str) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = self
            .postings
            .get(token)
            .map(|docs| docs.iter().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    /// Check whether a token is in the vocabulary.
    pub fn contains(&self, token: &str) -> bool {
        self.postings.contains_key(token)
    }

    /// Number of distinct tokens.
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }

    /// Number of distinct documents referenced by postings or stats.
    pub fn document_count(&self) -> usize {
        let mut ids: AHashSet<DocumentId> = self.doc_stats.keys().copied().collect();
        for docs in self.postings.values() {
            ids.extend(docs.iter().copied());
        }
        ids.len()
    }

    /// Stats recorded for a document, if it was ingested in this process.
    pub fn doc_stats(&self, id: DocumentId) -> Option<DocStats> {
        self.doc_stats.get(&id).copied()
    }

    /// Iterate over all tokens and their posting lists in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.postings.iter().map(|(token, docs)| (token.as_str(), docs))
    }

    /// Check if nothing has been indexed.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
