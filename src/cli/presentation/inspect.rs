//! Inspect presentation: direct children table.

use crate::tree::{DirectoryEntry, Entry, FsEntry};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

pub fn format_children_table(directory: &DirectoryEntry, children: &[&Entry]) -> String {
    let heading = format!(
        "{} ({} bytes, {} children)",
        directory.path().display(),
        directory.size(),
        directory.children().len()
    );
    if children.is_empty() {
        return format!("{}\n  No matching entries.", heading);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Kind", "Size"]);
    for child in children {
        table.add_row(vec![
            child.name().into_owned(),
            child.kind().to_string(),
            child.size().to_string(),
        ]);
    }
    format!("{}\n{}", heading, table)
}
