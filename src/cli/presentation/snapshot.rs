//! Snapshot presentation: save summary and stored-entry listing.

use crate::error::{ApiError, SnapshotError};
use crate::snapshot::{Snapshot, SnapshotFormat};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use std::path::Path;

pub fn format_snapshot_summary(snapshot: &Snapshot, path: &Path, format: SnapshotFormat) -> String {
    format!(
        "Saved snapshot of {} ({} entries, {} bytes) to {} ({})",
        snapshot.root,
        snapshot.len(),
        snapshot.total_size,
        path.display(),
        format
    )
}

pub fn format_snapshot_text(snapshot: &Snapshot) -> String {
    let header = format!(
        "Snapshot of {}\n  Taken: {}\n  Entries: {}\n  Total size: {} bytes",
        snapshot.root,
        snapshot.created_at.to_rfc3339(),
        snapshot.len(),
        snapshot.total_size
    );
    if snapshot.is_empty() {
        return header;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Path", "Kind", "Size"]);
    for entry in &snapshot.entries {
        table.add_row(vec![
            entry.path.to_string(),
            entry.kind.to_string(),
            entry.size.to_string(),
        ]);
    }
    format!("{}\n\n{}", header, table)
}

pub fn format_snapshot_json(snapshot: &Snapshot) -> Result<String, ApiError> {
    serde_json::to_string_pretty(snapshot)
        .map_err(|e| ApiError::Snapshot(SnapshotError::Serialization(e.to_string())))
}
