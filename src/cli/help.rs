//! CLI help and command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string recorded on the command span (e.g. "snapshot", "compare").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Snapshot { .. } => "snapshot",
        Commands::Compare { .. } => "compare",
        Commands::Show { .. } => "show",
        Commands::Inspect { .. } => "inspect",
    }
}
