//! Snapshot persistence for the indexes.

pub mod files;
pub mod snapshot;

pub use files::SnapshotFiles;
pub use snapshot::IndexSnapshot;
