//! Path canonicalization and relative-path utilities

use crate::error::FsError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a path used as the root of an entry.
///
/// Resolves `..`, `.` and symlinks in the given path itself (not in anything
/// below it), and yields an absolute path without the `\\?\` prefix on Windows.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, FsError> {
    dunce::canonicalize(path).map_err(|e| FsError::from_io(path, e))
}

/// Path of `path` relative to `base`.
///
/// Fails with [`FsError::NotADescendant`] if `path` is not `base` or inside it.
pub fn relative_path(path: &Path, base: &Path) -> Result<PathBuf, FsError> {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .map_err(|_| FsError::NotADescendant {
            path: path.to_path_buf(),
            base: base.to_path_buf(),
        })
}

/// Render a relative path in portable form: `/`-separated, component text
/// kept exactly as stored on disk.
///
/// Fails with [`FsError::NonUtf8Name`] rather than substituting characters, so
/// two distinct names can never render the same.
pub fn normalize_relative(path: &Path) -> Result<String, FsError> {
    let mut parts = Vec::new();
    for component in path.components() {
        if let Component::Normal(name) = component {
            let name = name
                .to_str()
                .ok_or_else(|| FsError::NonUtf8Name(path.to_path_buf()))?;
            parts.push(name);
        }
    }
    Ok(parts.join("/"))
}

/// NFC form of a relative path, for spotting names that differ only in
/// Unicode normalization.
pub fn nfc_key(relative: &str) -> String {
    relative.nfc().collect()
}

/// Check that `name` is a single, plain path component.
pub fn validate_entry_name(name: &str) -> Result<(), FsError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !name.contains(['/', '\\']) => Ok(()),
        _ => Err(FsError::InvalidName(name.to_string())),
    }
}
