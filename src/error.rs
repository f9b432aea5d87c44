//! Error types for the Talaash library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TalaashError`] enum. Query evaluation itself never fails: unknown terms
//! and malformed patterns produce empty results instead.
//!
//! # Examples
//!
//! ```
//! use talaash::error::{Result, TalaashError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TalaashError::query("invalid query format"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => assert_eq!(e.to_string(), "Query error: invalid query format"),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Talaash operations.
#[derive(Error, Debug)]
pub enum TalaashError {
    /// I/O errors (snapshot files, corpus files, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (normalizer configuration)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Query-related errors (query line parsing)
    #[error("Query error: {0}")]
    Query(String),

    /// Ingestion errors (missing corpus directory, unreadable corpus files)
    #[error("Ingest error: {0}")]
    Ingest(String),

    /// Snapshot and document store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// A requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for operations that may fail with TalaashError.
pub type Result<T> = std::result::Result<T, TalaashError>;

impl TalaashError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TalaashError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        TalaashError::Query(msg.into())
    }

    /// Create a new ingest error.
    pub fn ingest<S: Into<String>>(msg: S) -> Self {
        TalaashError::Ingest(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        TalaashError::Storage(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TalaashError::Config(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        TalaashError::NotFound(msg.into())
    }
}
