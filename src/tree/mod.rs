//! Filesystem Entry Tree
//!
//! Represents a directory tree as immutable entries captured in a single scan.
//! Files and directories share the [`entry::FsEntry`] contract; directory
//! sizes are the recursive sum of their children.

pub mod entry;
pub mod path;
pub mod walker;

pub use entry::{DeleteMode, DirectoryEntry, Entry, EntryKind, FileEntry, FsEntry};
pub use walker::Walk;
