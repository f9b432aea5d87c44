//! Serializable form of the indexes.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::index::bigram::{BigramIndex, token_bigrams};
use crate::index::inverted::{DocumentId, InvertedIndex, PostingList};

/// Word postings and bigram postings as sorted maps of sorted lists.
///
/// Set iteration order is arbitrary, so everything is sorted at capture time
/// to make written snapshots deterministic and diffable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub token_postings: BTreeMap<String, Vec<DocumentId>>,
    pub bigram_postings: BTreeMap<String, Vec<String>>,
}

impl IndexSnapshot {
    /// Capture both indexes.
    pub fn capture(inverted: &InvertedIndex, bigrams: &BigramIndex) -> Self {
        let token_postings = inverted
            .iter()
            .map(|(token, docs)| {
                let mut ids: Vec<DocumentId> = docs.iter().copied().collect();
                ids.sort_unstable();
                (token.to_string(), ids)
            })
            .collect();

        let bigram_postings = bigrams
            .iter()
            .map(|(gram, tokens)| {
                let mut tokens: Vec<String> = tokens.iter().cloned().collect();
                tokens.sort_unstable();
                (gram.to_string(), tokens)
            })
            .collect();

        IndexSnapshot {
            token_postings,
            bigram_postings,
        }
    }

    /// Rebuild the indexes. List order and duplicates in the lists are ignored.
    ///
    /// Bigram entries naming tokens that have no word postings are dropped,
    /// since every bigram token must be a key of the inverted index. Tokens
    /// missing from any of their own bigrams are registered again so wildcard
    /// queries still reach them.
    pub fn restore(self) -> (InvertedIndex, BigramIndex) {
        let postings: AHashMap<String, PostingList> = self
            .token_postings
            .into_iter()
            .map(|(token, ids)| (token, ids.into_iter().collect()))
            .collect();

        let mut dropped = 0usize;
        let mut grams: AHashMap<String, AHashSet<String>> =
            AHashMap::with_capacity(self.bigram_postings.len());
        for (gram, tokens) in self.bigram_postings {
            let known: AHashSet<String> = tokens
                .into_iter()
                .filter(|token| {
                    let known = postings.contains_key(token);
                    if !known {
                        dropped += 1;
                    }
                    known
                })
                .collect();
            if !known.is_empty() {
                grams.insert(gram, known);
            }
        }
        if dropped > 0 {
            warn!("Dropped {dropped} bigram entries for tokens without postings");
        }

        let mut bigrams = BigramIndex::from_postings(grams);
        let mut repaired = 0usize;
        for token in postings.keys() {
            let registered = token_bigrams(token)
                .iter()
                .all(|gram| bigrams.tokens(gram).is_some_and(|tokens| tokens.contains(token)));
            if !registered {
                bigrams.index_token(token);
                repaired += 1;
            }
        }
        if repaired > 0 {
            warn!("Re-registered bigrams for {repaired} tokens missing from the bigram snapshot");
        }

        (InvertedIndex::from_postings(postings), bigrams)
    }

    /// Number of tokens with postings.
    pub fn vocabulary_size(&self) -> usize {
        self.token_postings.len()
    }

    /// Number of bigrams.
    pub fn bigram_count(&self) -> usize {
        self.bigram_postings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::text_index::TextIndex;

    fn sample() -> TextIndex {
        let mut index = TextIndex::default();
        index.add_document(3, "wheat exports fall");
        index.add_document(1, "wheat prices rise");
        index.add_document(2, "corn prices");
        index
    }

    #[test]
    fn test_capture_is_sorted() {
        let snapshot = sample().snapshot();
        assert_eq!(snapshot.token_postings["wheat"], vec![1, 3]);
        assert_eq!(snapshot.token_postings["prices"], vec![1, 2]);
        assert_eq!(snapshot.bigram_postings["$w"], vec!["wheat"]);
        assert_eq!(snapshot.bigram_postings["ri"], vec!["prices", "rise"]);
        assert_eq!(snapshot.bigram_postings["s$"], vec!["exports", "prices"]);

        let keys: Vec<&String> = snapshot.token_postings.keys().collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_round_trip() {
        let index = sample();
        let snapshot = index.snapshot();
        let (inverted, bigrams) = snapshot.clone().restore();

        assert_eq!(IndexSnapshot::capture(&inverted, &bigrams), snapshot);
        assert_eq!(inverted.lookup("prices"), vec![1, 2]);
        assert_eq!(bigrams.len(), index.bigrams().len());
    }

    #[test]
    fn test_restore_ignores_order_and_duplicates() {
        let mut snapshot = IndexSnapshot::default();
        snapshot
            .token_postings
            .insert("wheat".to_string(), vec![9, 2, 9, 4]);
        snapshot
            .bigram_postings
            .insert("$w".to_string(), vec!["wheat".to_string(), "wheat".to_string()]);

        let (inverted, bigrams) = snapshot.restore();
        assert_eq!(inverted.lookup("wheat"), vec![2, 4, 9]);
        assert_eq!(bigrams.tokens("$w").map(|t| t.len()), Some(1));
    }

    #[test]
    fn test_restore_drops_orphan_bigram_tokens() {
        let mut snapshot = IndexSnapshot::default();
        snapshot.token_postings.insert("wheat".to_string(), vec![1]);
        snapshot.bigram_postings.insert(
            "$w".to_string(),
            vec!["wheat".to_string(), "what".to_string()],
        );
        snapshot
            .bigram_postings
            .insert("ha".to_string(), vec!["what".to_string()]);

        let (_, bigrams) = snapshot.restore();
        assert_eq!(bigrams.len(), 1);
        assert!(!bigrams.tokens("$w").unwrap().contains("what"));
        assert!(bigrams.tokens("ha").is_none());
    }

    #[test]
    fn test_restore_registers_tokens_missing_bigrams() {
        let mut snapshot = sample().snapshot();
        snapshot.token_postings.insert("corn".to_string(), vec![2, 4]);
        snapshot.token_postings.insert("cocoa".to_string(), vec![5]);
        snapshot.bigram_postings.retain(|_, tokens| {
            tokens.retain(|token| token != "corn");
            !tokens.is_empty()
        });

        let (inverted, bigrams) = snapshot.restore();
        assert!(bigrams.tokens("$c").unwrap().contains("corn"));
        assert!(bigrams.tokens("rn").unwrap().contains("corn"));
        assert!(bigrams.tokens("oa").unwrap().contains("cocoa"));
        assert_eq!(bigrams.wildcard_search("c*n", &inverted), vec![2, 4]);
        assert_eq!(bigrams.wildcard_search("co*", &inverted), vec![2, 4, 5]);
    }

    #[test]
    fn test_json_shape() {
        let snapshot = sample().snapshot();
        let json = serde_json::to_value(&snapshot.token_postings).unwrap();
        assert_eq!(json["corn"], serde_json::json!([2]));
    }
}
