//! Reuters-21578 SGML adapter.
//!
//! Reads every `*.sgm` file in a directory. Each file holds a run of
//! `<REUTERS ... NEWID="n"> ... </REUTERS>` blocks; the adapter extracts the
//! NEWID, the `<TITLE>` and the `<BODY>` (which the corpus terminates with
//! `&#3;`). Files are latin-1 encoded.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::{debug, info};
use rayon::prelude::*;
use regex::Regex;

use crate::error::{Result, TalaashError};
use crate::ingest::{IngestBatch, IngestRecord, IngestionAdapter};

/// Extension of corpus files.
pub const SGML_EXTENSION: &str = "sgm";

static DOCUMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<REUTERS.*?</REUTERS>").expect("valid document regex"));
static NEWID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"NEWID="(\d+)""#).expect("valid NEWID regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<TITLE>(.*?)</TITLE>").expect("valid title regex"));
static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<BODY>(.*?)&#3;</BODY>").expect("valid body regex"));

/// Reads Reuters SGML files from a directory.
#[derive(Debug, Clone)]
pub struct ReutersAdapter {
    dir: PathBuf,
}

impl ReutersAdapter {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        ReutersAdapter { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Corpus files in the directory, sorted by name.
    pub fn sgml_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Err(TalaashError::ingest(format!(
                "Directory not found: {}",
                self.dir.display()
            )));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == SGML_EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl IngestionAdapter for ReutersAdapter {
    fn read_batch(&self) -> Result<IngestBatch> {
        let files = self.sgml_files()?;

        let per_file = files
            .par_iter()
            .map(|path| -> Result<Vec<IngestRecord>> {
                let records = parse_file(path)?;
                info!(
                    "Processed {}: {} documents",
                    path.file_name()
                        .map(|name| name.to_string_lossy())
                        .unwrap_or_default(),
                    records.len()
                );
                Ok(records)
            })
            .collect::<Result<Vec<Vec<IngestRecord>>>>()?;

        Ok(IngestBatch {
            records: per_file.into_iter().flatten().collect(),
            sources: files.len(),
        })
    }

    fn describe(&self) -> String {
        format!("Reuters SGML files in {}", self.dir.display())
    }
}

/// Read and parse one latin-1 encoded corpus file.
pub fn parse_file(path: &Path) -> Result<Vec<IngestRecord>> {
    let bytes = fs::read(path).map_err(|e| {
        TalaashError::ingest(format!("Failed to read {}: {e}", path.display()))
    })?;
    Ok(parse_documents(&decode_latin1(&bytes)))
}

/// Extract records from SGML content. Blocks without a NEWID are skipped.
pub fn parse_documents(content: &str) -> Vec<IngestRecord> {
    DOCUMENT_RE
        .find_iter(content)
        .filter_map(|block| parse_document(block.as_str()))
        .collect()
}

fn parse_document(block: &str) -> Option<IngestRecord> {
    let id = match NEWID_RE
        .captures(block)
        .and_then(|caps| caps[1].parse::<u64>().ok())
    {
        Some(id) => id,
        None => {
            debug!("Skipping document without a usable NEWID");
            return None;
        }
    };

    let title = TITLE_RE
        .captures(block)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();
    let body = BODY_RE
        .captures(block)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    Some(IngestRecord { id, title, body })
}

/// Latin-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"<!DOCTYPE lewis SYSTEM "lewis.dtd">
<REUTERS TOPICS="YES" LEWISSPLIT="TRAIN" OLDID="5544" NEWID="1">
<DATE>26-FEB-1987 15:01:01.79</DATE>
<TEXT>&#2;
<TITLE>WHEAT PRICES RISE</TITLE>
<BODY>Wheat prices rose sharply on Thursday.
 Reuter
&#3;</BODY></TEXT>
</REUTERS>
<REUTERS TOPICS="NO" OLDID="5545">
<TEXT><TITLE>NO ID HERE</TITLE></TEXT>
</REUTERS>
<REUTERS TOPICS="NO" OLDID="5546" NEWID="2">
<TEXT TYPE="BRIEF">&#2;
<TITLE>CORN EXPORTS FALL</TITLE>
</TEXT>
</REUTERS>
"#;

    #[test]
    fn test_parse_documents() {
        let records = parse_documents(SAMPLE);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].title, "WHEAT PRICES RISE");
        assert_eq!(
            records[0].body,
            "Wheat prices rose sharply on Thursday.\n Reuter\n"
        );

        assert_eq!(records[1].id, 2);
        assert_eq!(records[1].title, "CORN EXPORTS FALL");
        assert_eq!(records[1].body, "");
    }

    #[test]
    fn test_latin1_decoding() {
        assert_eq!(decode_latin1(b"caf\xe9"), "café");
    }

    #[test]
    fn test_read_batch_from_directory() {
        let dir = TempDir::new().unwrap();
        let renumbered = SAMPLE
            .replace("NEWID=\"1\"", "NEWID=\"10\"")
            .replace("NEWID=\"2\"", "NEWID=\"20\"");
        fs::write(dir.path().join("reut2-001.sgm"), renumbered).unwrap();
        fs::write(dir.path().join("reut2-000.sgm"), SAMPLE).unwrap();
        fs::write(dir.path().join("README.txt"), SAMPLE).unwrap();

        let adapter = ReutersAdapter::new(dir.path());
        let batch = adapter.read_batch().unwrap();

        assert_eq!(batch.sources, 2);
        let ids: Vec<u64> = batch.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 10, 20]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let adapter = ReutersAdapter::new(dir.path().join("missing"));
        let err = adapter.read_batch().unwrap_err();
        assert!(matches!(err, TalaashError::Ingest(_)));
        assert!(err.to_string().contains("Directory not found"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let batch = ReutersAdapter::new(dir.path()).read_batch().unwrap();
        assert_eq!(batch, IngestBatch::default());
    }
}
