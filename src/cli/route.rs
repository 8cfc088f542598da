//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_children_table, format_comparison_json, format_comparison_text, format_snapshot_json,
    format_snapshot_summary, format_snapshot_text,
};
use crate::config::{ConfigLoader, DirsnapConfig};
use crate::error::{ApiError, FsError};
use crate::snapshot::{self, open_store, RelPath, Verdict};
use crate::tree::path::{canonicalize_path, relative_path};
use crate::tree::{DirectoryEntry, Entry, FsEntry};
use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, info_span};

/// Result of a successful command: text for stdout, plus the comparison
/// verdict when the command produced one.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub text: String,
    pub verdict: Option<Verdict>,
}

impl CommandOutput {
    fn text(text: String) -> Self {
        Self {
            text,
            verdict: None,
        }
    }
}

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    config: DirsnapConfig,
    color: bool,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(config))
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(config: DirsnapConfig) -> Self {
        let color = config.logging.color && std::io::stdout().is_terminal();
        Self { config, color }
    }

    pub fn config(&self) -> &DirsnapConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, ApiError> {
        let span = info_span!("command", name = command_name(command));
        let _enter = span.enter();

        match command {
            Commands::Snapshot { root, output } => self.handle_snapshot(root, output.as_deref()),
            Commands::Compare {
                root,
                snapshot,
                format,
            } => self.handle_compare(root, snapshot.as_deref(), format),
            Commands::Show { snapshot, format } => self.handle_show(snapshot.as_deref(), format),
            Commands::Inspect { root, path, kind } => {
                self.handle_inspect(root, path.as_deref(), kind)
            }
        }
    }

    fn handle_snapshot(&self, root: &Path, output: Option<&Path>) -> Result<CommandOutput, ApiError> {
        let path = self.config.storage.resolve_path(output);
        let format = self.config.storage.format_for(&path);

        let excluded = baseline_exclusion(root, &path);
        let snap = snapshot::snapshot(root)?.without(&excluded);
        open_store(format).save(&snap, &path)?;
        info!(
            entries = snap.len(),
            path = %path.display(),
            %format,
            "Snapshot saved"
        );

        Ok(CommandOutput::text(format_snapshot_summary(&snap, &path, format)))
    }

    fn handle_compare(
        &self,
        root: &Path,
        snapshot_path: Option<&Path>,
        format: &str,
    ) -> Result<CommandOutput, ApiError> {
        let path = self.config.storage.resolve_path(snapshot_path);
        let reference = open_store(self.config.storage.format_for(&path)).load(&path)?;

        let excluded = baseline_exclusion(root, &path);
        let comparison = snapshot::compare_excluding(root, &reference.entries, &excluded)?;
        let text = match format {
            "json" => format_comparison_json(&comparison)?,
            _ => format_comparison_text(&comparison, self.color),
        };

        Ok(CommandOutput {
            text,
            verdict: Some(comparison.verdict()),
        })
    }

    fn handle_show(&self, snapshot_path: Option<&Path>, format: &str) -> Result<CommandOutput, ApiError> {
        let path = self.config.storage.resolve_path(snapshot_path);
        let stored = open_store(self.config.storage.format_for(&path)).load(&path)?;

        let text = match format {
            "json" => format_snapshot_json(&stored)?,
            _ => format_snapshot_text(&stored),
        };
        Ok(CommandOutput::text(text))
    }

    fn handle_inspect(
        &self,
        root: &Path,
        sub_path: Option<&Path>,
        kind: &str,
    ) -> Result<CommandOutput, ApiError> {
        let scanned = DirectoryEntry::scan(root)?;
        let directory = match sub_path {
            Some(sub_path) => descend(&scanned, sub_path)?,
            None => &scanned,
        };

        let children = directory.filter(|child| match kind {
            "files" => child.is_file(),
            "dirs" => child.is_dir(),
            _ => true,
        });
        Ok(CommandOutput::text(format_children_table(directory, &children)))
    }
}

/// Relative path of the snapshot file when it sits inside the tree it records.
///
/// Only the file itself is excluded; a parent directory created to hold it
/// is still part of the tree.
fn baseline_exclusion(root: &Path, baseline: &Path) -> BTreeSet<RelPath> {
    let mut excluded = BTreeSet::new();
    let name = match baseline.file_name() {
        Some(name) => name,
        None => return excluded,
    };
    let parent = match baseline.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let (root, parent) = match (canonicalize_path(root), canonicalize_path(parent)) {
        (Ok(root), Ok(parent)) => (root, parent),
        _ => return excluded,
    };

    if let Ok(relative) = relative_path(&parent.join(name), &root) {
        if let Ok(rel) = RelPath::from_path(&relative) {
            debug!(baseline = %rel, "Snapshot file lies inside the scanned root");
            excluded.insert(rel);
        }
    }
    excluded
}

/// Follow `relative` down from `root` one child name at a time.
fn descend<'a>(root: &'a DirectoryEntry, relative: &Path) -> Result<&'a DirectoryEntry, FsError> {
    let mut current = root;
    for component in relative.components() {
        let name = match component {
            Component::Normal(name) => name.to_string_lossy(),
            Component::CurDir => continue,
            _ => {
                return Err(FsError::NotADescendant {
                    path: root.path().join(relative),
                    base: root.path().to_path_buf(),
                })
            }
        };
        current = match current.get_child(&name) {
            Some(Entry::Directory(dir)) => dir,
            Some(Entry::File(file)) => return Err(FsError::NotADirectory(file.path().to_path_buf())),
            None => return Err(FsError::NotFound(current.path().join(&*name))),
        };
    }
    Ok(current)
}
