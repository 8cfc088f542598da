//! Directory Structure Snapshots
//!
//! Flattens a scanned directory tree into records addressed by their path
//! relative to the scan root. A [`Snapshot`] is the persisted form: the flat
//! record list plus a little metadata about when and where it was taken.

pub mod compare;
pub mod persistence;

use crate::error::FsError;
use crate::tree::path;
use crate::tree::{DirectoryEntry, Entry, EntryKind, FsEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};
use std::path::{Component, Path};
use tracing::{debug, instrument, warn};

pub use compare::{compare, compare_excluding, Comparison, Verdict};
pub use persistence::{
    open_store, BincodeSnapshotStore, JsonSnapshotStore, SnapshotFormat, SnapshotStore,
};

/// Current on-disk schema version
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Portable relative path: `/`-separated, component text as stored on disk
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelPath(String);

impl RelPath {
    /// Relative path with its component text kept exactly
    pub fn from_path(path: &Path) -> Result<Self, FsError> {
        path::normalize_relative(path).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelPath {
    fn from(value: &str) -> Self {
        let parts: Vec<&str> = Path::new(value)
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect();
        Self(parts.join("/"))
    }
}

impl std::fmt::Display for RelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One flattened entry of a snapshot.
///
/// Identity is the relative path only; `kind` and `size` are informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub path: RelPath,
    pub kind: EntryKind,
    pub size: u64,
}

impl SnapshotEntry {
    /// Record `entry` relative to `root`
    pub fn from_entry(entry: &Entry, root: &DirectoryEntry) -> Result<Self, FsError> {
        let relative = entry.relative_to(root)?;
        Ok(Self {
            path: RelPath::from_path(&relative)?,
            kind: entry.kind(),
            size: entry.size(),
        })
    }
}

impl PartialEq for SnapshotEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for SnapshotEntry {}

impl Hash for SnapshotEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// A persisted directory structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    /// Root the snapshot was taken from, for display only
    pub root: String,
    pub total_size: u64,
    pub entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    /// Wrap flattened entries of `root` with metadata
    pub fn from_directory(root: &DirectoryEntry) -> Result<Self, FsError> {
        Ok(Self {
            version: SNAPSHOT_FORMAT_VERSION,
            created_at: Utc::now(),
            root: root.path().display().to_string(),
            total_size: root.size(),
            entries: flatten(root)?,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Relative paths in sorted order
    pub fn paths(&self) -> BTreeSet<&RelPath> {
        self.entries.iter().map(|e| &e.path).collect()
    }

    /// Drop the entries at `excluded` paths; their file bytes leave the total.
    pub fn without(mut self, excluded: &BTreeSet<RelPath>) -> Self {
        if excluded.is_empty() {
            return self;
        }
        let removed: u64 = self
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::File && excluded.contains(&e.path))
            .map(|e| e.size)
            .sum();
        self.entries.retain(|e| !excluded.contains(&e.path));
        self.total_size = self.total_size.saturating_sub(removed);
        self
    }
}

/// Map every descendant of `root`, in walk order, to its relative record.
pub fn flatten(root: &DirectoryEntry) -> Result<Vec<SnapshotEntry>, FsError> {
    let entries = root
        .walk()
        .map(|entry| SnapshotEntry::from_entry(entry, root))
        .collect::<Result<Vec<_>, _>>()?;
    warn_on_normalization_aliases(&entries);
    Ok(entries)
}

/// Names that differ only in Unicode normalization stay separate entries, but
/// may merge when the tree is copied to a normalizing filesystem.
fn warn_on_normalization_aliases(entries: &[SnapshotEntry]) {
    let mut seen: HashMap<String, &RelPath> = HashMap::new();
    for entry in entries {
        if let Some(other) = seen.insert(path::nfc_key(entry.path.as_str()), &entry.path) {
            warn!(
                first = %other,
                second = %entry.path,
                "Entries differ only in Unicode normalization"
            );
        }
    }
}

/// Structure fingerprint of the tree at `root`: one record per descendant,
/// in pre-order.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn get_structure(root: &Path) -> Result<Vec<SnapshotEntry>, FsError> {
    let directory = DirectoryEntry::scan(root)?;
    let entries = flatten(&directory)?;
    debug!(entry_count = entries.len(), "Flattened directory structure");
    Ok(entries)
}

/// Scan `root` and build a snapshot document ready to be saved.
pub fn snapshot(root: &Path) -> Result<Snapshot, FsError> {
    let directory = DirectoryEntry::scan(root)?;
    Snapshot::from_directory(&directory)
}
