//! CLI presentation: text and json formatters per command.

mod compare;
mod inspect;
mod snapshot;

pub use compare::{format_comparison_json, format_comparison_text};
pub use inspect::format_children_table;
pub use snapshot::{format_snapshot_json, format_snapshot_summary, format_snapshot_text};
