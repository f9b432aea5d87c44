//! Lifecycle states of a text index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an index stands between startup, ingestion and persistence.
///
/// ```text
/// Uninitialized -> Loaded      (snapshot found and parsed)
/// Uninitialized -> Empty       (no usable snapshot)
/// Empty | Loaded | Persisted -> Populated   (add_document)
/// Populated -> Persisted       (snapshot written)
/// ```
///
/// There is no rollback: a failed ingestion leaves whatever was added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexLifecycle {
    #[default]
    Uninitialized,
    Loaded,
    Empty,
    Populated,
    Persisted,
}

impl IndexLifecycle {
    /// State after the startup load attempt.
    pub fn on_startup(self, snapshot_loaded: bool) -> Self {
        if snapshot_loaded {
            IndexLifecycle::Loaded
        } else {
            IndexLifecycle::Empty
        }
    }

    /// State after a document was added.
    pub fn on_ingest(self) -> Self {
        IndexLifecycle::Populated
    }

    /// State after a snapshot was written.
    ///
    /// Persisting a loaded or empty index is allowed and also ends in
    /// `Persisted`.
    pub fn on_persist(self) -> Self {
        match self {
            IndexLifecycle::Uninitialized => IndexLifecycle::Uninitialized,
            _ => IndexLifecycle::Persisted,
        }
    }

    /// Whether the in-memory index has changes no snapshot holds yet.
    pub fn is_dirty(self) -> bool {
        self == IndexLifecycle::Populated
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IndexLifecycle::Uninitialized => "uninitialized",
            IndexLifecycle::Loaded => "loaded",
            IndexLifecycle::Empty => "empty",
            IndexLifecycle::Populated => "populated",
            IndexLifecycle::Persisted => "persisted",
        }
    }
}

impl fmt::Display for IndexLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let start = IndexLifecycle::default();
        assert_eq!(start, IndexLifecycle::Uninitialized);
        assert_eq!(start.on_startup(true), IndexLifecycle::Loaded);
        assert_eq!(start.on_startup(false), IndexLifecycle::Empty);

        let populated = IndexLifecycle::Empty.on_ingest();
        assert_eq!(populated, IndexLifecycle::Populated);
        assert!(populated.is_dirty());

        let persisted = populated.on_persist();
        assert_eq!(persisted, IndexLifecycle::Persisted);
        assert!(!persisted.is_dirty());

        assert_eq!(IndexLifecycle::Loaded.on_ingest(), IndexLifecycle::Populated);
        assert_eq!(persisted.on_ingest(), IndexLifecycle::Populated);
        assert_eq!(
            IndexLifecycle::Uninitialized.on_persist(),
            IndexLifecycle::Uninitialized
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(IndexLifecycle::Persisted.to_string(), "persisted");
        assert_eq!(
            serde_json::to_string(&IndexLifecycle::Loaded).unwrap(),
            "\"loaded\""
        );
    }
}
