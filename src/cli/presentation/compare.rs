//! Compare presentation: extra/missing listing and verdict line.

use crate::error::{ApiError, SnapshotError};
use crate::snapshot::{Comparison, Verdict};
use owo_colors::OwoColorize;

pub fn format_comparison_text(comparison: &Comparison, color: bool) -> String {
    let mut lines = Vec::new();

    if !comparison.extra.is_empty() {
        lines.push("The directory has the following extra file(s):".to_string());
        lines.extend(comparison.extra.iter().map(|p| p.to_string()));
    }
    if !comparison.missing.is_empty() {
        lines.push("The directory is missing the following file(s):".to_string());
        lines.extend(comparison.missing.iter().map(|p| p.to_string()));
    }

    let verdict = match comparison.verdict() {
        Verdict::Correct => "The directory is correct.",
        Verdict::Incorrect => "The directory is incorrect.",
    };
    let verdict = match (color, comparison.verdict()) {
        (false, _) => verdict.to_string(),
        (true, Verdict::Correct) => verdict.green().to_string(),
        (true, Verdict::Incorrect) => verdict.red().bold().to_string(),
    };
    lines.push(verdict);

    lines.join("\n")
}

pub fn format_comparison_json(comparison: &Comparison) -> Result<String, ApiError> {
    let out = serde_json::json!({
        "extra": comparison.extra,
        "missing": comparison.missing,
        "verdict": comparison.verdict(),
    });
    serde_json::to_string_pretty(&out)
        .map_err(|e| ApiError::Snapshot(SnapshotError::Serialization(e.to_string())))
}
