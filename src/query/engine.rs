//! Query evaluation over the inverted and bigram indexes.

use ahash::AHashSet;
use log::debug;

use crate::analysis::normalizer::Normalizer;
use crate::index::bigram::BigramIndex;
use crate::index::inverted::{DocumentId, InvertedIndex};
use crate::index::text_index::TextIndex;
use crate::query::kind::QueryKind;

/// Evaluates queries against a read-only view of the indexes.
///
/// Evaluation never fails and never mutates: unknown terms contribute
/// nothing and unknown query kinds match nothing. Every result is sorted
/// ascending by document id.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    normalizer: &'a Normalizer,
    inverted: &'a InvertedIndex,
    bigrams: &'a BigramIndex,
}

impl<'a> QueryEngine<'a> {
    /// Create an engine over a text index.
    pub fn new(index: &'a TextIndex) -> Self {
        Self::with_parts(index.normalizer(), index.inverted(), index.bigrams())
    }

    /// Create an engine over individual components.
    pub fn with_parts(
        normalizer: &'a Normalizer,
        inverted: &'a InvertedIndex,
        bigrams: &'a BigramIndex,
    ) -> Self {
        QueryEngine {
            normalizer,
            inverted,
            bigrams,
        }
    }

    /// Evaluate `text` as a query of the given kind.
    pub fn evaluate(&self, kind: &QueryKind, text: &str) -> Vec<DocumentId> {
        let result = match kind {
            QueryKind::Conjunctive => self.conjunctive(&self.normalizer.normalize(text)),
            QueryKind::Disjunctive => self.disjunctive(&self.normalizer.normalize(text)),
            // Normalizing would strip the '*'.
            QueryKind::Wildcard => self.wildcard(text.trim()),
            QueryKind::Unrecognized(tag) => {
                debug!("Ignoring query with unrecognized type {tag:?}");
                Vec::new()
            }
        };
        debug!("{kind} query {text:?} matched {} documents", result.len());
        result
    }

    /// Evaluate `text` under a wire tag (`type1`, `type2`, `type3`).
    pub fn evaluate_tag(&self, tag: &str, text: &str) -> Vec<DocumentId> {
        self.evaluate(&QueryKind::from_tag(tag), text)
    }

    /// Documents containing every token.
    ///
    /// Any token missing from the vocabulary makes the result empty, as
    /// does an empty token list.
    pub fn conjunctive(&self, tokens: &[String]) -> Vec<DocumentId> {
        let mut tokens = tokens.iter();
        let mut result: AHashSet<DocumentId> =
            match tokens.next().and_then(|token| self.inverted.postings(token)) {
                Some(docs) => docs.clone(),
                None => return Vec::new(),
            };

        for token in tokens {
            let Some(docs) = self.inverted.postings(token) else {
                return Vec::new();
            };
            result.retain(|id| docs.contains(id));
        }

        sorted(result)
    }

    /// Documents containing at least one token. Unknown tokens are skipped.
    pub fn disjunctive(&self, tokens: &[String]) -> Vec<DocumentId> {
        let mut result: AHashSet<DocumentId> = AHashSet::new();
        for docs in tokens.iter().filter_map(|token| self.inverted.postings(token)) {
            result.extend(docs.iter().copied());
        }
        sorted(result)
    }

    /// Documents containing a token matching a single-`*` pattern.
    pub fn wildcard(&self, pattern: &str) -> Vec<DocumentId> {
        self.bigrams.wildcard_search(pattern, self.inverted)
    }
}

fn sorted(ids: AHashSet<DocumentId>) -> Vec<DocumentId> {
    let mut ids: Vec<DocumentId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids
}
