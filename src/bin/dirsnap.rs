//! dirsnap CLI Binary
//!
//! Command-line interface for snapshotting and verifying directory trees.

use clap::Parser;
use dirsnap::cli::{exit_code, map_error, Cli, RunContext, EXIT_FAILURE};
use dirsnap::config::ConfigLoader;
use dirsnap::logging::{init_logging, LoggingConfig};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();
    let workspace = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli, &workspace);
    if let Err(e) = logging_config.validate() {
        eprintln!("Error: {}", e);
        process::exit(EXIT_FAILURE);
    }

    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    debug!("dirsnap starting");

    let context = match RunContext::new(workspace, cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            debug!(verdict = ?output.verdict, "Command completed");
            println!("{}", output.text);
            process::exit(exit_code(output.verdict));
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(EXIT_FAILURE);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, workspace: &std::path::Path) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
