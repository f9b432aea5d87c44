//! Command implementations for the Talaash CLI.

use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::engine::SearchEngine;
use crate::error::{Result, TalaashError};
use crate::ingest::ReutersAdapter;
use crate::store::{DocumentStore, MemoryDocumentStore, hydrate};

/// Execute a CLI command.
pub fn execute_command(args: TalaashArgs) -> Result<()> {
    let config = args.engine_config()?;
    debug!("Using data directory {}", config.data_dir.display());

    match &args.command {
        Command::Import(import_args) => import_corpus(import_args, &config, &args),
        Command::Search(search_args) => search_index(search_args, &config, &args),
        Command::Show(show_args) => show_document(show_args, &config, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &config, &args),
    }
}

/// Rebuild the index from a Reuters corpus directory.
fn import_corpus(args: &ImportArgs, config: &EngineConfig, cli_args: &TalaashArgs) -> Result<()> {
    let engine = SearchEngine::open(config);
    let adapter = ReutersAdapter::new(&args.corpus_dir);

    let (report, documents_stored) = if args.no_documents {
        (engine.rebuild(&adapter, None)?, None)
    } else {
        let mut store = MemoryDocumentStore::new();
        let report = engine.rebuild(&adapter, Some(&mut store))?;
        store.save(&config.documents_file())?;
        (report, Some(store.len()))
    };

    output_result(
        "Import finished",
        &ImportResult {
            corpus_dir: args.corpus_dir.to_string_lossy().to_string(),
            report,
            documents_stored,
        },
        cli_args,
    )
}

/// Run a query line against the persisted index.
fn search_index(args: &SearchArgs, config: &EngineConfig, cli_args: &TalaashArgs) -> Result<()> {
    let start = Instant::now();
    let line = args.query_line();
    let engine = SearchEngine::open(config);

    let ids = engine.search(&line)?;
    info!("Query '{line}' matched {} documents", ids.len());

    let shown = match args.limit {
        Some(limit) => &ids[..ids.len().min(limit)],
        None => &ids[..],
    };
    let documents = if args.ids_only {
        Vec::new()
    } else {
        let store = MemoryDocumentStore::load_or_default(&config.documents_file())?;
        hydrate(&store, shown)
    };

    output_result(
        &format!("Results for: {line}"),
        &SearchResults {
            query: line.clone(),
            total_hits: ids.len(),
            ids: shown.to_vec(),
            documents,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Print one stored document.
fn show_document(args: &ShowArgs, config: &EngineConfig, cli_args: &TalaashArgs) -> Result<()> {
    let store = MemoryDocumentStore::load_or_default(&config.documents_file())?;
    let document = store
        .get(args.id)
        .ok_or_else(|| TalaashError::not_found(format!("document {}", args.id)))?;

    output_result(&format!("Document {}", args.id), &document, cli_args)
}

/// Show index statistics.
fn show_stats(args: &StatsArgs, config: &EngineConfig, cli_args: &TalaashArgs) -> Result<()> {
    let engine = SearchEngine::open(config);

    let stored_documents = if args.detailed {
        Some(MemoryDocumentStore::load_or_default(&config.documents_file())?.len())
    } else {
        None
    };

    output_result(
        "Index statistics",
        &StatsResult {
            index: engine.stats(),
            stored_documents,
        },
        cli_args,
    )
}
