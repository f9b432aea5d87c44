//! Bigram index for wildcard lookups.
//!
//! Every indexed token is wrapped in boundary markers (`$wheat$`) and split
//! into overlapping two-character grams (`$w`, `wh`, `he`, `ea`, `at`, `t$`).
//! Each gram maps to the set of tokens containing it. A wildcard pattern is
//! answered by intersecting the gram sets of its literal prefix and suffix,
//! then verifying the few surviving candidates with an anchored regex, so the
//! vocabulary is never scanned.

use ahash::{AHashMap, AHashSet};
use log::{debug, trace, warn};
use regex::Regex;

use crate::index::inverted::{DocumentId, InvertedIndex};

/// Marker placed before and after a token when extracting bigrams.
pub const BOUNDARY: char = '$';

/// The wildcard character in a pattern.
pub const WILDCARD: char = '*';

/// Maps bigrams to the tokens containing them.
#[derive(Debug, Clone, Default)]
pub struct BigramIndex {
    grams: AHashMap<String, AHashSet<String>>,
}

impl BigramIndex {
    /// Create an empty bigram index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a bigram index from its gram sets, e.g. after loading a snapshot.
    pub fn from_postings(grams: AHashMap<String, AHashSet<String>>) -> Self {
        BigramIndex { grams }
    }

    /// Register a token under every bigram of `$token$`.
    ///
    /// Indexing the same token twice has no further effect.
    pub fn index_token(&mut self, token: &str) {
        for gram in token_bigrams(token) {
            self.grams.entry(gram).or_default().insert(token.to_string());
        }
    }

    /// Get the tokens registered under a bigram.
    pub fn tokens(&self, gram: &str) -> Option<&AHashSet<String>> {
        self.grams.get(gram)
    }

    /// Number of distinct bigrams.
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    /// Check if no token has been indexed.
    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    /// Iterate over all bigrams and their token sets in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AHashSet<String>)> {
        self.grams.iter().map(|(gram, tokens)| (gram.as_str(), tokens))
    }

    /// Narrow the vocabulary to tokens that may match a wildcard pattern.
    ///
    /// Returns `None` when the pattern has no `*` or when both the prefix and
    /// the suffix are empty: a bare `*` does not enumerate the vocabulary.
    /// The result can still contain tokens the pattern does not match.
    pub fn candidates(&self, pattern: &str) -> Option<AHashSet<String>> {
        let pattern = pattern.to_lowercase();
        let (prefix, suffix) = pattern.split_once(WILDCARD)?;
        debug!("Wildcard prefix: {prefix:?}, suffix: {suffix:?}");

        let prefix_candidates = if prefix.is_empty() {
            None
        } else {
            Some(self.intersect_grams(&bigrams(&format!("{BOUNDARY}{prefix}"))))
        };

        let suffix_candidates = if suffix.is_empty() {
            None
        } else {
            Some(self.intersect_grams(&bigrams(&format!("{suffix}{BOUNDARY}"))))
        };

        match (prefix_candidates, suffix_candidates) {
            (Some(mut prefix), Some(suffix)) => {
                prefix.retain(|token| suffix.contains(token));
                Some(prefix)
            }
            (Some(side), None) | (None, Some(side)) => Some(side),
            (None, None) => None,
        }
    }

    /// Find documents containing a token that matches a wildcard pattern.
    ///
    /// Only the first `*` splits the pattern; it matches zero or more
    /// characters. Patterns without `*`, a bare `*`, and patterns with no
    /// matching token all yield an empty result. Ids are sorted ascending.
    pub fn wildcard_search(&self, pattern: &str, index: &InvertedIndex) -> Vec<DocumentId> {
        let candidates = match self.candidates(pattern) {
            Some(candidates) if !candidates.is_empty() => candidates,
            _ => {
                debug!("No wildcard candidates for {pattern:?}");
                return Vec::new();
            }
        };
        trace!("Candidates before verification: {candidates:?}");

        let matcher = match compile_pattern(pattern) {
            Some(matcher) => matcher,
            None => return Vec::new(),
        };

        let mut doc_ids: AHashSet<DocumentId> = AHashSet::new();
        let mut matched = 0usize;
        for token in candidates.iter().filter(|token| matcher.is_match(token)) {
            matched += 1;
            trace!("Wildcard {pattern:?} matched token {token:?}");
            if let Some(docs) = index.postings(token) {
                doc_ids.extend(docs.iter().copied());
            }
        }
        debug!(
            "Wildcard {pattern:?}: {} candidates, {matched} verified, {} documents",
            candidates.len(),
            doc_ids.len()
        );

        let mut result: Vec<DocumentId> = doc_ids.into_iter().collect();
        result.sort_unstable();
        result
    }

    /// Intersect the token sets of `grams` in order.
    ///
    /// An unknown gram empties the result immediately.
    fn intersect_grams(&self, grams: &[String]) -> AHashSet<String> {
        let mut iter = grams.iter();
        let mut result = match iter.next().and_then(|gram| self.grams.get(gram)) {
            Some(tokens) => tokens.clone(),
            None => return AHashSet::new(),
        };
        trace!("Bigram {:?}: {} tokens", grams[0], result.len());

        for gram in iter {
            match self.grams.get(gram) {
                Some(tokens) => {
                    trace!("Bigram {gram:?}: {} tokens", tokens.len());
                    result.retain(|token| tokens.contains(token));
                }
                None => return AHashSet::new(),
            }
            if result.is_empty() {
                break;
            }
        }

        result
    }
}

/// The bigrams of a token wrapped in boundary markers.
///
/// A token of `n` characters yields `n + 1` bigrams.
pub fn token_bigrams(token: &str) -> Vec<String> {
    bigrams(&format!("{BOUNDARY}{token}{BOUNDARY}"))
}

/// All overlapping two-character substrings of `text`.
pub fn bigrams(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(2).map(|pair| pair.iter().collect()).collect()
}

/// Compile a wildcard pattern into an anchored, lowercase regex.
///
/// `*` becomes `.*`; every other character is matched literally.
fn compile_pattern(pattern: &str) -> Option<Regex> {
    let body = pattern
        .to_lowercase()
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    match Regex::new(&format!("^{body}$")) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Invalid wildcard pattern {pattern:?}: {e}");
            None
        }
    }
}
