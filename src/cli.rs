//! CLI domain: parse, route, help, output, and presentation only.
//! No domain logic; single route table dispatches to the snapshot services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::{exit_code, map_error, EXIT_FAILURE, EXIT_INCORRECT};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_children_table, format_comparison_json, format_comparison_text, format_snapshot_json,
    format_snapshot_summary, format_snapshot_text,
};
pub use route::{CommandOutput, RunContext};
