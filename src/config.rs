//! Engine configuration.
//!
//! Everything has a default, so a missing configuration file is not an
//! error. Paths inside a configuration file are taken as written.
//!
//! ```json
//! {
//!   "data_dir": "/var/lib/talaash",
//!   "punctuation_file": "/etc/talaash/punctuations.txt",
//!   "stopwords_file": "/etc/talaash/stopwords.txt"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::Normalizer;
use crate::error::{Result, TalaashError};
use crate::persistence::files::{BIGRAMS_FILE, INDEX_FILE, SnapshotFiles};
use crate::store::memory::DOCUMENTS_FILE;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const OUTPUT_DIR: &str = "output";
pub const PUNCTUATION_FILE: &str = "punctuations.txt";
pub const STOPWORDS_FILE: &str = "stopwords.txt";

/// Where the engine keeps its files and how it normalizes text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root for snapshots, stored documents and default normalizer files.
    pub data_dir: PathBuf,
    /// Punctuation characters file; `<data_dir>/punctuations.txt` if unset.
    pub punctuation_file: Option<PathBuf>,
    /// Stop words file; `<data_dir>/stopwords.txt` if unset.
    pub stopwords_file: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            punctuation_file: None,
            stopwords_file: None,
        }
    }
}

impl EngineConfig {
    /// Configuration rooted at `data_dir` with every other field defaulted.
    pub fn with_data_dir<P: Into<PathBuf>>(data_dir: P) -> Self {
        EngineConfig {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TalaashError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            TalaashError::config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    pub fn output_dir(&self) -> PathBuf {
        self.data_dir.join(OUTPUT_DIR)
    }

    pub fn index_file(&self) -> PathBuf {
        self.output_dir().join(INDEX_FILE)
    }

    pub fn bigrams_file(&self) -> PathBuf {
        self.output_dir().join(BIGRAMS_FILE)
    }

    pub fn documents_file(&self) -> PathBuf {
        self.data_dir.join(DOCUMENTS_FILE)
    }

    pub fn snapshot_files(&self) -> SnapshotFiles {
        SnapshotFiles::new(self.index_file(), self.bigrams_file())
    }

    /// The punctuation file to read, if any.
    ///
    /// An explicit path is always returned so that a wrong path is reported;
    /// the implicit one only when it exists.
    pub fn resolved_punctuation_file(&self) -> Option<PathBuf> {
        resolve(&self.punctuation_file, self.data_dir.join(PUNCTUATION_FILE))
    }

    /// The stop words file to read, if any.
    pub fn resolved_stopwords_file(&self) -> Option<PathBuf> {
        resolve(&self.stopwords_file, self.data_dir.join(STOPWORDS_FILE))
    }

    /// Build the normalizer described by this configuration.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::from_files(
            self.resolved_punctuation_file().as_deref(),
            self.resolved_stopwords_file().as_deref(),
        )
    }
}

fn resolve(explicit: &Option<PathBuf>, implicit: PathBuf) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.clone()),
        None if implicit.is_file() => Some(implicit),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_paths() {
        let config = EngineConfig::default();
        assert_eq!(config.index_file(), Path::new("data/output/index.json"));
        assert_eq!(config.bigrams_file(), Path::new("data/output/bigrams.json"));
        assert_eq!(config.documents_file(), Path::new("data/documents.json"));
    }

    #[test]
    fn test_load_partial_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("talaash.json");
        fs::write(&path, r#"{"stopwords_file": "/tmp/stop.txt"}"#).unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.stopwords_file, Some(PathBuf::from("/tmp/stop.txt")));
        assert_eq!(config.punctuation_file, None);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            EngineConfig::load(&missing),
            Err(TalaashError::Config(_))
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{").unwrap();
        assert!(matches!(
            EngineConfig::load(&broken),
            Err(TalaashError::Config(_))
        ));
    }

    #[test]
    fn test_implicit_normalizer_files() {
        let dir = TempDir::new().unwrap();
        let config = EngineConfig::with_data_dir(dir.path());
        assert_eq!(config.resolved_stopwords_file(), None);

        fs::write(dir.path().join(STOPWORDS_FILE), "wheat\n").unwrap();
        assert_eq!(
            config.resolved_stopwords_file(),
            Some(dir.path().join(STOPWORDS_FILE))
        );
        assert_eq!(config.normalizer().normalize("the wheat"), vec!["the"]);
    }
}
