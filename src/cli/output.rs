//! CLI output: error mapping and exit codes.

use crate::error::ApiError;
use crate::snapshot::Verdict;

/// Exit status when a command fails
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when `compare` finds an incorrect directory
pub const EXIT_INCORRECT: i32 = 2;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    format!("Error: {}", e)
}

/// Process exit status for a successful command
pub fn exit_code(verdict: Option<Verdict>) -> i32 {
    match verdict {
        Some(Verdict::Incorrect) => EXIT_INCORRECT,
        _ => 0,
    }
}
