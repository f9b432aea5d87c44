//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TalaashArgs};
use crate::engine::{IndexStats, RebuildReport};
use crate::error::Result;
use crate::index::inverted::DocumentId;
use crate::store::StoredDocument;

/// Result structure for an import.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResult {
    pub corpus_dir: String,
    #[serde(flatten)]
    pub report: RebuildReport,
    pub documents_stored: Option<usize>,
}

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub total_hits: usize,
    pub ids: Vec<DocumentId>,
    pub documents: Vec<StoredDocument>,
    pub duration_ms: u64,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    #[serde(flatten)]
    pub index: IndexStats,
    pub stored_documents: Option<usize>,
}

/// Rendering of a result for people.
pub trait HumanOutput {
    fn print_human(&self);
}

impl HumanOutput for ImportResult {
    fn print_human(&self) {
        println!("Import Summary:");
        println!("═══════════════");
        println!("Corpus: {}", self.corpus_dir);
        println!("Files processed: {}", self.report.files_processed);
        println!("Documents indexed: {}", self.report.documents_indexed);
        println!("Unique words: {}", self.report.vocabulary_size);
        println!("Bigrams: {}", self.report.bigram_count);
        if let Some(stored) = self.documents_stored {
            println!("Documents stored: {stored}");
        }
        println!("Import time: {}ms", self.report.duration_ms);
    }
}

impl HumanOutput for SearchResults {
    fn print_human(&self) {
        println!("Search Results:");
        println!("═══════════════");

        if self.documents.is_empty() {
            if !self.ids.is_empty() {
                println!("Ids: {}", format_ids(&self.ids));
            }
        } else {
            for document in &self.documents {
                println!();
                println!("[{}] {}", document.id, document.title.trim());
                println!("─────────────");
                println!("{}", document.description.trim());
            }
        }

        println!();
        println!("Total hits: {}", self.total_hits);
        println!("Search time: {}ms", self.duration_ms);
    }
}

impl HumanOutput for StoredDocument {
    fn print_human(&self) {
        println!("Document {}", self.id);
        println!("═════════");
        println!("Title: {}", self.title.trim());
        println!();
        println!("{}", self.description.trim());
    }
}

impl HumanOutput for StatsResult {
    fn print_human(&self) {
        println!("Index Statistics:");
        println!("════════════════");
        println!("State: {}", self.index.state);
        println!("Unique words: {}", self.index.vocabulary_size);
        println!("Bigrams: {}", self.index.bigram_count);
        println!("Indexed documents: {}", self.index.document_count);
        if self.index.unsaved_changes {
            println!("Unsaved changes: yes");
        }
        if let Some(stored) = self.stored_documents {
            println!("Stored documents: {stored}");
        }
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &TalaashArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human();
            Ok(())
        }
        OutputFormat::Json => {
            println!("{}", format_json(result, args.compact)?);
            Ok(())
        }
    }
}

/// Serialize a result as JSON, pretty unless `compact`.
pub fn format_json<T: Serialize>(result: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(json)
}

/// Ids as a comma separated list.
fn format_ids(ids: &[DocumentId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
