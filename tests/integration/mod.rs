//! Integration tests for directory structure snapshots

mod cli_commands;
mod persistence;
mod tree_structure;
