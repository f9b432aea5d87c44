//! Snapshot artifacts on disk.
//!
//! A snapshot is written as two pretty-printed JSON files, one for word
//! postings and one for bigram postings. Each file is written to a `.tmp`
//! sibling first and renamed into place.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, TalaashError};
use crate::persistence::snapshot::IndexSnapshot;

pub const INDEX_FILE: &str = "index.json";
pub const BIGRAMS_FILE: &str = "bigrams.json";
pub const TEMP_EXTENSION: &str = "tmp";

/// Locations of the two snapshot artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFiles {
    index_file: PathBuf,
    bigrams_file: PathBuf,
}

impl SnapshotFiles {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(index_file: P, bigrams_file: Q) -> Self {
        SnapshotFiles {
            index_file: index_file.into(),
            bigrams_file: bigrams_file.into(),
        }
    }

    /// Both artifacts under `dir` with their default names.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(INDEX_FILE), dir.join(BIGRAMS_FILE))
    }

    pub fn index_file(&self) -> &Path {
        &self.index_file
    }

    pub fn bigrams_file(&self) -> &Path {
        &self.bigrams_file
    }

    /// Check whether both artifacts exist.
    pub fn exists(&self) -> bool {
        self.index_file.is_file() && self.bigrams_file.is_file()
    }

    /// Write both artifacts, creating parent directories as needed.
    ///
    /// Both `.tmp` files are written before either is renamed into place, so
    /// a failed write leaves the previous pair untouched and the in-memory
    /// index is never affected.
    pub fn save(&self, snapshot: &IndexSnapshot) -> Result<()> {
        let index_temp = write_temp(&self.index_file, &snapshot.token_postings)?;
        let bigrams_temp = match write_temp(&self.bigrams_file, &snapshot.bigram_postings) {
            Ok(path) => path,
            Err(e) => {
                discard_temp(&index_temp);
                return Err(e);
            }
        };

        if let Err(e) = replace(&index_temp, &self.index_file) {
            discard_temp(&bigrams_temp);
            return Err(e);
        }
        replace(&bigrams_temp, &self.bigrams_file)?;

        info!(
            "Saved {} words and {} bigrams to {}",
            snapshot.vocabulary_size(),
            snapshot.bigram_count(),
            self.index_file
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .display()
        );
        Ok(())
    }

    /// Read both artifacts.
    ///
    /// Returns `Ok(None)` if either file is missing and an error if either
    /// fails to read or parse.
    pub fn load(&self) -> Result<Option<IndexSnapshot>> {
        if !self.exists() {
            return Ok(None);
        }

        let token_postings: BTreeMap<String, Vec<u64>> = read_json(&self.index_file)?;
        let bigram_postings: BTreeMap<String, Vec<String>> = read_json(&self.bigrams_file)?;
        let snapshot = IndexSnapshot {
            token_postings,
            bigram_postings,
        };
        info!(
            "Loaded {} words and {} bigrams from files",
            snapshot.vocabulary_size(),
            snapshot.bigram_count()
        );
        Ok(Some(snapshot))
    }

    /// Read both artifacts, treating any failure as "no snapshot".
    ///
    /// A corrupt or partially written artifact is reported with a warning and
    /// never aborts startup.
    pub fn load_or_empty(&self) -> Option<IndexSnapshot> {
        match self.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Error loading index files, starting empty: {e}");
                None
            }
        }
    }
}

/// Write `value` as pretty JSON to the `.tmp` sibling of `path`.
fn write_temp<T: Serialize>(path: &Path, value: &T) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            TalaashError::storage(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let temp_path = path.with_extension(TEMP_EXTENSION);
    let file = File::create(&temp_path).map_err(|e| {
        TalaashError::storage(format!("Failed to create {}: {e}", temp_path.display()))
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(temp_path)
}

fn replace(temp_path: &Path, path: &Path) -> Result<()> {
    fs::rename(temp_path, path).map_err(|e| {
        TalaashError::storage(format!("Failed to replace {}: {e}", path.display()))
    })
}

fn discard_temp(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path) {
        warn!("Could not remove {}: {e}", temp_path.display());
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        TalaashError::storage(format!("Failed to parse {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::text_index::TextIndex;
    use tempfile::TempDir;

    fn snapshot() -> IndexSnapshot {
        let mut index = TextIndex::default();
        index.add_document(2, "wheat exports fall");
        index.add_document(1, "wheat prices rise");
        index.snapshot()
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let files = SnapshotFiles::in_dir(dir.path().join("output"));
        assert!(!files.exists());
        assert!(files.load().unwrap().is_none());

        let original = snapshot();
        files.save(&original).unwrap();
        assert!(files.exists());
        assert!(!files.index_file().with_extension(TEMP_EXTENSION).exists());

        let loaded = files.load().unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_output_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let first = SnapshotFiles::in_dir(dir.path().join("a"));
        let second = SnapshotFiles::in_dir(dir.path().join("b"));
        first.save(&snapshot()).unwrap();
        second.save(&snapshot()).unwrap();

        let a = fs::read_to_string(first.index_file()).unwrap();
        let b = fs::read_to_string(second.index_file()).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("{\n  \"exports\": [\n    2\n  ],"));
    }

    #[test]
    fn test_missing_one_artifact() {
        let dir = TempDir::new().unwrap();
        let files = SnapshotFiles::in_dir(dir.path());
        files.save(&snapshot()).unwrap();
        fs::remove_file(files.bigrams_file()).unwrap();

        assert!(files.load().unwrap().is_none());
        assert!(files.load_or_empty().is_none());
    }

    #[test]
    fn test_corrupt_artifact_falls_back() {
        let dir = TempDir::new().unwrap();
        let files = SnapshotFiles::in_dir(dir.path());
        files.save(&snapshot()).unwrap();
        fs::write(files.bigrams_file(), "{\"$w\": [\"whe").unwrap();

        assert!(matches!(files.load(), Err(TalaashError::Storage(_))));
        assert!(files.load_or_empty().is_none());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "").unwrap();

        let files = SnapshotFiles::in_dir(blocker.join("output"));
        assert!(files.save(&snapshot()).is_err());
    }

    #[test]
    fn test_failed_bigrams_write_keeps_previous_pair() {
        let dir = TempDir::new().unwrap();
        let files = SnapshotFiles::in_dir(dir.path());
        let first = snapshot();
        files.save(&first).unwrap();

        // A directory where the bigrams temp file should go.
        let bigrams_temp = files.bigrams_file().with_extension(TEMP_EXTENSION);
        fs::create_dir(&bigrams_temp).unwrap();

        let mut index = TextIndex::default();
        index.add_document(3, "corn exports");
        let err = files.save(&index.snapshot()).unwrap_err();
        assert!(matches!(err, TalaashError::Storage(_)));

        assert_eq!(files.load().unwrap().unwrap(), first);
        assert!(!files.index_file().with_extension(TEMP_EXTENSION).exists());
    }
}
