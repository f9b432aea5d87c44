//! Index structures: the inverted index, its bigram companion, and the
//! [`TextIndex`] that keeps them in step.

pub mod bigram;
pub mod inverted;
pub mod lifecycle;
pub mod text_index;

pub use bigram::BigramIndex;
pub use inverted::{DocStats, DocumentId, InvertedIndex, PostingList};
pub use lifecycle::IndexLifecycle;
pub use text_index::TextIndex;
