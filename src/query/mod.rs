//! Query kinds, query line parsing and evaluation.
//!
//! Three query forms are supported:
//!
//! - `type1`: conjunctive, every normalized term must occur
//! - `type2`: disjunctive, any normalized term may occur
//! - `type3`: wildcard, one `*` pattern matched against indexed tokens
//!
//! # Examples
//!
//! ```
//! use talaash::index::TextIndex;
//! use talaash::query::{QueryEngine, QueryKind};
//!
//! let mut index = TextIndex::default();
//! index.add_document(1, "wheat prices rise");
//! index.add_document(2, "wheat exports fall");
//!
//! let engine = QueryEngine::new(&index);
//! assert_eq!(engine.evaluate(&QueryKind::Conjunctive, "wheat prices"), vec![1]);
//! assert_eq!(engine.evaluate(&QueryKind::Disjunctive, "prices fall"), vec![1, 2]);
//! assert_eq!(engine.evaluate(&QueryKind::Wildcard, "wh*t"), vec![1, 2]);
//! ```

pub mod engine;
pub mod kind;

pub use engine::QueryEngine;
pub use kind::{ParsedQuery, QueryKind};
