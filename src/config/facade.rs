//! Config loader: the single entry point for building a `DirsnapConfig`.

use super::merge;
use super::sources::{environment, global_file, workspace_file};
use super::DirsnapConfig;
use crate::error::ApiError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads configuration from defaults, files and environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the given workspace directory.
    ///
    /// Precedence (highest last): defaults, global file, workspace
    /// `dirsnap.toml`, `DIRSNAP__*` environment variables.
    pub fn load(workspace_root: &Path) -> Result<DirsnapConfig, ApiError> {
        let builder = merge::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);

        let config: DirsnapConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Self::validated(config)
    }

    /// Load defaults plus one explicit file (which must exist), then environment.
    pub fn load_from_file(path: &Path) -> Result<DirsnapConfig, ApiError> {
        let builder = merge::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);

        let config: DirsnapConfig = builder.build()?.try_deserialize()?;
        debug!(config_path = %path.display(), "Configuration loaded from file");
        Self::validated(config)
    }

    /// Location of the global config file, if one can be determined
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    fn validated(config: DirsnapConfig) -> Result<DirsnapConfig, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
