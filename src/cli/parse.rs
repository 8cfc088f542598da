//! CLI parse: clap types for dirsnap. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dirsnap - snapshot a directory tree and verify it later
#[derive(Parser)]
#[command(name = "dirsnap")]
#[command(about = "Snapshot a directory tree's structure and verify a live directory against it")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record the structure of a directory as a baseline snapshot
    Snapshot {
        /// Directory to snapshot
        root: PathBuf,
        /// Snapshot file to write (default: storage.snapshot_path)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Verify a directory against a baseline snapshot
    Compare {
        /// Directory to verify
        root: PathBuf,
        /// Baseline snapshot file (default: storage.snapshot_path)
        #[arg(long, short)]
        snapshot: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// List the entries recorded in a snapshot file
    Show {
        /// Snapshot file (default: storage.snapshot_path)
        snapshot: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show the direct children of a directory with their sizes
    Inspect {
        /// Directory to scan
        root: PathBuf,
        /// Subdirectory, relative to root, to list instead of root
        #[arg(long)]
        path: Option<PathBuf>,
        /// Which children to list (all, files, dirs)
        #[arg(long, default_value = "all", value_parser = ["all", "files", "dirs"])]
        kind: String,
    },
}
