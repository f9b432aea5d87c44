//! Text normalizer.
//!
//! Turns raw document or query text into the tokens used as index keys:
//! punctuation characters become whitespace, the text is lowercased and split
//! on whitespace, and stop words are dropped.
//!
//! Both the punctuation set and the stop word set can be loaded from files.
//! A file that cannot be read falls back to the built-in default for that set;
//! missing configuration is never an error.
//!
//! # Examples
//!
//! ```
//! use talaash::analysis::normalizer::Normalizer;
//!
//! let normalizer = Normalizer::new(); // built-in defaults
//! let tokens = normalizer.normalize("The wheat-prices rose, sharply!");
//!
//! // "the" is a stop word, '-' and punctuation split words
//! assert_eq!(tokens, vec!["wheat", "prices", "rose", "sharply"]);
//! ```

use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use ahash::AHashSet;
use log::{debug, warn};

use crate::error::{Result, TalaashError};

/// Default punctuation characters, replaced by whitespace before splitting.
pub const DEFAULT_PUNCTUATION: &str = ".,;:!?()[]{}\"'`~@#$%^&*-_=+<>/\\|";

/// Default English stop words.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "because", "as", "what", "which", "this", "that",
    "these", "those", "then", "just", "so", "than", "such", "both", "through", "about", "for",
    "is", "of", "while", "during", "to",
];

/// Default punctuation as a set.
pub static DEFAULT_PUNCTUATION_SET: LazyLock<AHashSet<char>> =
    LazyLock::new(|| DEFAULT_PUNCTUATION.chars().collect());

/// Default stop words as a set.
pub static DEFAULT_STOP_WORDS_SET: LazyLock<AHashSet<String>> =
    LazyLock::new(|| DEFAULT_STOP_WORDS.iter().map(|&s| s.to_string()).collect());

/// Splits text into normalized tokens.
///
/// The normalizer is immutable once built and cheap to clone; the sets are
/// shared behind `Arc`.
#[derive(Clone, Debug)]
pub struct Normalizer {
    punctuation: Arc<AHashSet<char>>,
    stop_words: Arc<AHashSet<String>>,
}

impl Normalizer {
    /// Create a normalizer with the built-in punctuation and stop word sets.
    pub fn new() -> Self {
        Self::with_sets(
            DEFAULT_PUNCTUATION_SET.clone(),
            DEFAULT_STOP_WORDS_SET.clone(),
        )
    }

    /// Create a normalizer from explicit sets.
    pub fn with_sets(punctuation: AHashSet<char>, stop_words: AHashSet<String>) -> Self {
        Normalizer {
            punctuation: Arc::new(punctuation),
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a normalizer from optional configuration files.
    ///
    /// Each set is loaded independently. A `None` path or a file that cannot
    /// be read yields the default set for that half, with a warning logged in
    /// the latter case.
    pub fn from_files(punctuation_file: Option<&Path>, stop_words_file: Option<&Path>) -> Self {
        let punctuation = match punctuation_file {
            Some(path) => load_punctuation(path).unwrap_or_else(|e| {
                warn!(
                    "Using default punctuation, could not load {}: {e}",
                    path.display()
                );
                DEFAULT_PUNCTUATION_SET.clone()
            }),
            None => DEFAULT_PUNCTUATION_SET.clone(),
        };

        let stop_words = match stop_words_file {
            Some(path) => load_stop_words(path).unwrap_or_else(|e| {
                warn!(
                    "Using default stop words, could not load {}: {e}",
                    path.display()
                );
                DEFAULT_STOP_WORDS_SET.clone()
            }),
            None => DEFAULT_STOP_WORDS_SET.clone(),
        };

        debug!(
            "Normalizer configured with {} punctuation characters and {} stop words",
            punctuation.len(),
            stop_words.len()
        );

        Self::with_sets(punctuation, stop_words)
    }

    /// Normalize text into an ordered sequence of tokens.
    ///
    /// Duplicates are kept; the caller decides whether to count or dedupe.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .chars()
            .map(|c| if self.is_punctuation(c) { ' ' } else { c })
            .collect();

        cleaned
            .to_lowercase()
            .split_whitespace()
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Check whether a character is treated as punctuation.
    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(&c)
    }

    /// Check whether a (lowercase) word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Number of punctuation characters.
    pub fn punctuation_len(&self) -> usize {
        self.punctuation.len()
    }

    /// Number of stop words.
    pub fn stop_words_len(&self) -> usize {
        self.stop_words.len()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a punctuation set: every character of the trimmed file content.
pub fn load_punctuation(path: &Path) -> Result<AHashSet<char>> {
    let content = read_config_file(path)?;
    Ok(content.trim().chars().collect())
}

/// Load a stop word set: one word per line of the trimmed file content.
pub fn load_stop_words(path: &Path) -> Result<AHashSet<String>> {
    let content = read_config_file(path)?;
    Ok(content
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn read_config_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => {
            TalaashError::analysis(format!("File not found: {}", path.display()))
        }
        _ => TalaashError::Io(e),
    })
}
