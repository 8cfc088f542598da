//! Filesystem entries captured at scan time
//!
//! An [`Entry`] is either a [`FileEntry`] or a [`DirectoryEntry`]. Both are
//! immutable values: the path never changes after construction, sizes are
//! computed eagerly, and a directory's children are listed exactly once.
//! Operations with filesystem side effects (`delete`, `rename`) consume the
//! entry, and `rename` hands back a freshly scanned one.

use crate::error::FsError;
use crate::tree::path;
use crate::tree::walker::Walk;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace};
use walkdir::WalkDir;

/// Shared identity and size contract for filesystem entries
pub trait FsEntry {
    /// Absolute path of the entry
    fn path(&self) -> &Path;

    /// Byte count captured at construction time
    fn size(&self) -> u64;

    /// Final path component
    fn name(&self) -> Cow<'_, str> {
        self.path()
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    }

    /// Path of this entry relative to `base` (another entry or a bare path)
    fn relative_to<P: AsRef<Path>>(&self, base: P) -> Result<PathBuf, FsError> {
        path::relative_path(self.path(), base.as_ref())
    }
}

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// How a directory delete treats existing children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Fail with [`FsError::DirectoryNotEmpty`] if the directory has children
    #[default]
    NonRecursive,
    /// Remove the whole subtree
    Recursive,
}

/// A regular file
#[derive(Debug, Clone)]
pub struct FileEntry {
    path: PathBuf,
    size: u64,
}

impl FileEntry {
    /// Open the file at `path` and capture its size
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FsError> {
        let path = path::canonicalize_path(path.as_ref())?;
        let metadata = fs::metadata(&path).map_err(|e| FsError::from_io(&path, e))?;
        if !metadata.is_file() {
            return Err(FsError::NotAFile(path));
        }
        Ok(Self {
            path,
            size: metadata.len(),
        })
    }

    pub fn read_to_string(&self) -> Result<String, FsError> {
        fs::read_to_string(&self.path).map_err(|e| FsError::from_io(&self.path, e))
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>, FsError> {
        fs::read(&self.path).map_err(|e| FsError::from_io(&self.path, e))
    }

    /// Overwrite the file with `content`, returning the entry as it is now.
    pub fn write(&self, content: &str) -> Result<FileEntry, FsError> {
        self.write_bytes(content.as_bytes())
    }

    /// Overwrite the file with raw bytes, returning the entry as it is now.
    pub fn write_bytes(&self, content: &[u8]) -> Result<FileEntry, FsError> {
        fs::write(&self.path, content).map_err(|e| FsError::from_io(&self.path, e))?;
        trace!(path = %self.path.display(), bytes = content.len(), "Wrote file");
        FileEntry::open(&self.path)
    }

    /// Append `content` to the file, returning the entry as it is now.
    pub fn append(&self, content: &str) -> Result<FileEntry, FsError> {
        {
            let mut file = fs::OpenOptions::new()
                .append(true)
                .open(&self.path)
                .map_err(|e| FsError::from_io(&self.path, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| FsError::from_io(&self.path, e))?;
        }
        FileEntry::open(&self.path)
    }

    /// Remove the file from disk
    pub fn delete(self) -> Result<(), FsError> {
        fs::remove_file(&self.path).map_err(|e| FsError::from_io(&self.path, e))?;
        debug!(path = %self.path.display(), "Deleted file");
        Ok(())
    }

    /// Rename within the same parent directory
    pub fn rename(self, new_name: &str) -> Result<FileEntry, FsError> {
        let destination = rename_within_parent(&self.path, new_name)?;
        FileEntry::open(destination)
    }
}

/// A directory and the children it held when it was scanned
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    path: PathBuf,
    children: Vec<Entry>,
    size: u64,
}

impl DirectoryEntry {
    /// Scan the directory at `path` and everything below it.
    ///
    /// Any unreadable child aborts the scan; a partial tree is never returned.
    #[instrument(skip_all, fields(root = %path.as_ref().display()))]
    pub fn scan<P: AsRef<Path>>(path: P) -> Result<Self, FsError> {
        let start = Instant::now();
        let path = path::canonicalize_path(path.as_ref())?;
        let metadata = fs::metadata(&path).map_err(|e| FsError::from_io(&path, e))?;
        if !metadata.is_dir() {
            return Err(FsError::NotADirectory(path));
        }

        let directory = Self::scan_canonical(path)?;

        info!(
            entries = directory.walk().count(),
            size = directory.size,
            duration_ms = start.elapsed().as_millis(),
            "Directory scan completed"
        );
        Ok(directory)
    }

    /// Build the subtree rooted at an already canonical directory path.
    fn scan_canonical(path: PathBuf) -> Result<Self, FsError> {
        let listing = WalkDir::new(&path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut children = Vec::new();
        for item in listing {
            let item = item.map_err(|e| FsError::from_walkdir(&path, e))?;
            let file_type = item.file_type();

            if file_type.is_dir() {
                children.push(Entry::Directory(Self::scan_canonical(item.into_path())?));
            } else if file_type.is_file() {
                let size = item
                    .metadata()
                    .map_err(|e| FsError::from_walkdir(&path, e))?
                    .len();
                children.push(Entry::File(FileEntry {
                    path: item.into_path(),
                    size,
                }));
            } else {
                trace!(path = %item.path().display(), "Skipping symlink or special file");
            }
        }

        let size = children.iter().map(Entry::size).sum();
        Ok(Self {
            path,
            children,
            size,
        })
    }

    /// Direct children in file-name order
    pub fn children(&self) -> &[Entry] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Find a direct child by name
    pub fn get_child(&self, name: &str) -> Option<&Entry> {
        self.children.iter().find(|child| child.name() == name)
    }

    /// Direct children matching `predicate`
    pub fn filter<F>(&self, mut predicate: F) -> Vec<&Entry>
    where
        F: FnMut(&Entry) -> bool,
    {
        self.children.iter().filter(|child| predicate(child)).collect()
    }

    /// Whether `entry` is one of the direct children
    pub fn contains(&self, entry: &Entry) -> bool {
        self.children.contains(entry)
    }

    /// Pre-order traversal of every descendant.
    ///
    /// Each call starts a new traversal over the tree captured at scan time.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(self)
    }

    /// Remove the directory from disk
    pub fn delete(self, mode: DeleteMode) -> Result<(), FsError> {
        match mode {
            DeleteMode::NonRecursive => {
                let mut listing =
                    fs::read_dir(&self.path).map_err(|e| FsError::from_io(&self.path, e))?;
                if listing.next().is_some() {
                    return Err(FsError::DirectoryNotEmpty(self.path));
                }
                fs::remove_dir(&self.path).map_err(|e| FsError::from_io(&self.path, e))?;
            }
            DeleteMode::Recursive => {
                fs::remove_dir_all(&self.path).map_err(|e| FsError::from_io(&self.path, e))?;
            }
        }
        debug!(path = %self.path.display(), ?mode, "Deleted directory");
        Ok(())
    }

    /// Rename within the same parent directory and rescan
    pub fn rename(self, new_name: &str) -> Result<DirectoryEntry, FsError> {
        let destination = rename_within_parent(&self.path, new_name)?;
        DirectoryEntry::scan(destination)
    }
}

impl<'a> IntoIterator for &'a DirectoryEntry {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// A file or directory
#[derive(Debug, Clone)]
pub enum Entry {
    File(FileEntry),
    Directory(DirectoryEntry),
}

impl Entry {
    /// Open whatever lives at `path`, scanning it fully if it is a directory.
    pub fn scan<P: AsRef<Path>>(path: P) -> Result<Self, FsError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
        if metadata.is_dir() {
            DirectoryEntry::scan(path).map(Entry::Directory)
        } else {
            FileEntry::open(path).map(Entry::File)
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Entry::File(_))
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryEntry> {
        match self {
            Entry::Directory(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }

    /// Remove the entry from disk. `mode` only matters for directories.
    pub fn delete(self, mode: DeleteMode) -> Result<(), FsError> {
        match self {
            Entry::File(file) => file.delete(),
            Entry::Directory(dir) => dir.delete(mode),
        }
    }

    pub fn rename(self, new_name: &str) -> Result<Entry, FsError> {
        match self {
            Entry::File(file) => file.rename(new_name).map(Entry::File),
            Entry::Directory(dir) => dir.rename(new_name).map(Entry::Directory),
        }
    }
}

impl FsEntry for FileEntry {
    fn path(&self) -> &Path {
        &self.path
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl FsEntry for DirectoryEntry {
    fn path(&self) -> &Path {
        &self.path
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl FsEntry for Entry {
    fn path(&self) -> &Path {
        match self {
            Entry::File(file) => file.path(),
            Entry::Directory(dir) => dir.path(),
        }
    }

    fn size(&self) -> u64 {
        match self {
            Entry::File(file) => file.size(),
            Entry::Directory(dir) => dir.size(),
        }
    }
}

// Identity is the path alone, so entries scanned at different times compare
// equal even when their sizes or children differ.
macro_rules! impl_path_identity {
    ($($ty:ty),*) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.path() == other.path()
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.path().hash(state);
            }
        }

        impl AsRef<Path> for $ty {
            fn as_ref(&self) -> &Path {
                self.path()
            }
        }
    )*};
}

impl_path_identity!(FileEntry, DirectoryEntry, Entry);

/// Move `from` to a sibling called `new_name`, returning the new path.
fn rename_within_parent(from: &Path, new_name: &str) -> Result<PathBuf, FsError> {
    path::validate_entry_name(new_name)?;
    let parent = from.parent().ok_or_else(|| FsError::Io {
        path: from.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "entry has no parent directory"),
    })?;
    let destination = parent.join(new_name);

    fs::symlink_metadata(from).map_err(|e| FsError::from_io(from, e))?;
    if fs::symlink_metadata(&destination).is_ok() {
        return Err(FsError::Conflict(destination));
    }

    fs::rename(from, &destination).map_err(|e| FsError::from_io(from, e))?;
    debug!(
        from = %from.display(),
        to = %destination.display(),
        "Renamed entry"
    );
    Ok(destination)
}
