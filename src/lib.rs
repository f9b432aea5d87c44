//! # Talaash
//!
//! A small full-text search engine over a fixed news corpus.
//!
//! ## Features
//!
//! - Configurable text normalization (punctuation, lowercasing, stop words)
//! - Inverted index with conjunctive and disjunctive queries
//! - Bigram index for `*` wildcard queries
//! - JSON snapshots loaded at startup
//! - Copy-then-swap rebuilds from pluggable ingestion adapters
//! - Reuters-21578 SGML ingestion

pub mod analysis;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod ingest;
pub mod persistence;
pub mod query;
pub mod store;

pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::engine::{IndexStats, RebuildReport, SearchEngine};
    pub use crate::error::{Result, TalaashError};
    pub use crate::index::DocumentId;
    pub use crate::query::{ParsedQuery, QueryKind};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
