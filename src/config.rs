//! Configuration System
//!
//! Layered configuration: built-in defaults, the global config file, the
//! workspace config file, then `DIRSNAP__`-prefixed environment variables.

use crate::logging::LoggingConfig;
use crate::snapshot::SnapshotFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirsnapConfig {
    /// Where and how baseline snapshots are stored
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Snapshot storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Default snapshot file for `snapshot` and `compare`
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Encoding used when the file extension does not decide it
    #[serde(default)]
    pub format: SnapshotFormat,
}

pub(crate) fn default_snapshot_path() -> PathBuf {
    PathBuf::from("dirsnap.snapshot.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            format: SnapshotFormat::default(),
        }
    }
}

impl StorageConfig {
    /// The explicit path if given, otherwise the configured default
    pub fn resolve_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.snapshot_path.clone())
    }

    /// Encoding to use for `path`
    pub fn format_for(&self, path: &Path) -> SnapshotFormat {
        SnapshotFormat::for_path(path, self.format)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err("Snapshot path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Storage(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Storage(msg) => write!(f, "Storage: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DirsnapConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.storage.validate() {
            errors.push(ValidationError::Storage(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
