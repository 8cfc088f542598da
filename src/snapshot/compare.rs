//! Structure comparison between a live directory and a stored snapshot

use crate::error::FsError;
use crate::snapshot::{get_structure, RelPath, SnapshotEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, instrument};

/// Outcome of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Set difference between a current structure and a reference structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Present now, absent from the reference
    pub extra: BTreeSet<RelPath>,
    /// Present in the reference, absent now
    pub missing: BTreeSet<RelPath>,
}

impl Comparison {
    /// Compare two flattened structures by relative-path identity.
    pub fn between(current: &[SnapshotEntry], reference: &[SnapshotEntry]) -> Self {
        let current: BTreeSet<&RelPath> = current.iter().map(|e| &e.path).collect();
        let reference: BTreeSet<&RelPath> = reference.iter().map(|e| &e.path).collect();

        Self {
            extra: current.difference(&reference).map(|p| (*p).clone()).collect(),
            missing: reference.difference(&current).map(|p| (*p).clone()).collect(),
        }
    }

    /// Forget differences at the given paths
    pub fn excluding(mut self, excluded: &BTreeSet<RelPath>) -> Self {
        self.extra.retain(|p| !excluded.contains(p));
        self.missing.retain(|p| !excluded.contains(p));
        self
    }

    pub fn is_correct(&self) -> bool {
        self.extra.is_empty() && self.missing.is_empty()
    }

    pub fn verdict(&self) -> Verdict {
        if self.is_correct() {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }
}

/// Scan `root` and compare it against `reference`.
///
/// An incorrect directory is a normal result; only scan failures are errors.
pub fn compare(root: &Path, reference: &[SnapshotEntry]) -> Result<Comparison, FsError> {
    compare_excluding(root, reference, &BTreeSet::new())
}

/// Like [`compare`], but paths in `excluded` are ignored on both sides.
#[instrument(skip_all, fields(root = %root.display(), reference_len = reference.len()))]
pub fn compare_excluding(
    root: &Path,
    reference: &[SnapshotEntry],
    excluded: &BTreeSet<RelPath>,
) -> Result<Comparison, FsError> {
    let current = get_structure(root)?;
    let comparison = Comparison::between(&current, reference).excluding(excluded);
    info!(
        extra = comparison.extra.len(),
        missing = comparison.missing.len(),
        excluded = excluded.len(),
        verdict = %comparison.verdict(),
        "Comparison completed"
    );
    Ok(comparison)
}
