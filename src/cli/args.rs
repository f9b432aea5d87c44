//! Command line argument parsing for the Talaash CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;
use crate::index::inverted::DocumentId;

/// Talaash - a full-text search engine for the Reuters news corpus
#[derive(Parser, Debug, Clone)]
#[command(name = "talaash")]
#[command(about = "A full-text search engine for the Reuters news corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TalaashArgs {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(
        short = 'f',
        long = "format",
        default_value = "human",
        global = true
    )]
    pub output_format: OutputFormat,

    /// Single-line JSON output
    #[arg(long, global = true)]
    pub compact: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "TALAASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Data directory, overrides the configuration file
    #[arg(short, long, value_name = "DATA_DIR", env = "TALAASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TalaashArgs {
    /// Get the effective verbosity level (0=quiet, 1=normal, 2=verbose, 3+=debug)
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// The engine configuration: the config file if given, then `--data-dir`.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rebuild the index from a directory of Reuters SGML files
    Import(ImportArgs),

    /// Run a query line such as "type1 wheat prices"
    Search(SearchArgs),

    /// Show a stored document
    Show(ShowArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for importing a corpus
#[derive(Parser, Debug, Clone)]
pub struct ImportArgs {
    /// Directory holding the *.sgm files
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Index only, do not write documents.json
    #[arg(long)]
    pub no_documents: bool,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query line: a type tag (type1, type2, type3) followed by the query text
    #[arg(value_name = "QUERY", num_args = 1.., required = true)]
    pub query: Vec<String>,

    /// Maximum number of documents to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print only document ids
    #[arg(long)]
    pub ids_only: bool,
}

impl SearchArgs {
    /// The query words joined back into one line.
    pub fn query_line(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for showing a document
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Document id
    #[arg(value_name = "ID")]
    pub id: DocumentId,
}

/// Arguments for index statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Also count stored documents
    #[arg(short, long)]
    pub detailed: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
