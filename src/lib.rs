//! dirsnap: Directory Structure Snapshots
//!
//! Captures a directory tree as immutable, path-identified entries, flattens it
//! into a snapshot of relative paths, and later verifies a live directory
//! against a stored snapshot by reporting extra and missing entries.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod snapshot;
pub mod tree;

pub use error::{ApiError, FsError, SnapshotError};
pub use snapshot::{compare, get_structure, snapshot, Comparison, Snapshot, SnapshotEntry, Verdict};
pub use tree::{DeleteMode, DirectoryEntry, Entry, FileEntry, FsEntry};
