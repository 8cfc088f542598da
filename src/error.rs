//! Error types for the dirsnap snapshot/verify system.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem entry errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(PathBuf),

    #[error("Destination already exists: {0}")]
    Conflict(PathBuf),

    #[error("{path} is not inside {base}")]
    NotADescendant { path: PathBuf, base: PathBuf },

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid entry name: {0:?}")]
    InvalidName(String),

    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an I/O error raised while operating on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => FsError::Conflict(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Classify an error yielded by a `walkdir` listing of `dir`.
    pub fn from_walkdir(dir: &Path, err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
        match err.into_io_error() {
            Some(io_err) => FsError::from_io(&path, io_err),
            None => FsError::Io {
                path,
                source: io::Error::new(io::ErrorKind::Other, "filesystem loop detected"),
            },
        }
    }
}

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot serialization failed: {0}")]
    Serialization(String),

    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    #[error("Snapshot file not found: {0}")]
    NotFound(PathBuf),

    #[error("Snapshot I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SnapshotError {
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            SnapshotError::NotFound(path.to_path_buf())
        } else {
            SnapshotError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }
}

/// Top-level errors surfaced to the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Fs(#[from] FsError),

    #[error("{0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
