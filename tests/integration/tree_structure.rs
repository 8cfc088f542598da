//! Integration tests for tree structure correctness

use super::test_utils::sample_tree;
use dirsnap::tree::{DeleteMode, DirectoryEntry, Entry, FileEntry, FsEntry};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

/// Test that the scanned tree reports every file and directory
#[test]
fn test_scan_contains_all_entries() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());

    let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
    let names: Vec<String> = root.walk().map(|e| e.name().into_owned()).collect();

    assert_eq!(names, vec!["a.txt", "b", "c.txt"]);
    assert_eq!(root.walk().filter(|e| e.is_file()).count(), 2);
    assert_eq!(root.walk().filter(|e| e.is_dir()).count(), 1);
}

/// Test that directory size is the sum of all nested file sizes
#[test]
fn test_directory_size_is_recursive_sum() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());

    let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
    assert_eq!(root.size(), 15);

    let b = root.get_child("b").and_then(Entry::as_directory).unwrap();
    assert_eq!(b.size(), 10);
}

/// Test that an empty directory has no children and zero size
#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
    assert!(root.is_empty());
    assert_eq!(root.size(), 0);
    assert_eq!(root.walk().count(), 0);
}

/// Test that scanning a missing path fails instead of producing an empty tree
#[test]
fn test_scan_missing_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    assert!(DirectoryEntry::scan(&missing).is_err());
}

/// Test that identity survives content changes between scans
#[test]
fn test_identity_is_path_based() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("a.txt");
    fs::write(&file_path, "hello").unwrap();

    let before = FileEntry::open(&file_path).unwrap();
    fs::write(&file_path, "hello, world").unwrap();
    let after = FileEntry::open(&file_path).unwrap();

    assert_ne!(before.size(), after.size());
    assert_eq!(before, after);

    let mut set = HashSet::new();
    set.insert(before);
    assert!(set.contains(&after));
}

/// Test that a missing child lookup is not an error
#[test]
fn test_get_child_absent_returns_none() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());

    let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
    assert!(root.get_child("zzz").is_none());
    assert!(root.get_child("c.txt").is_none());
}

/// Test that relative_to reports paths under the scan root
#[test]
fn test_relative_paths_from_root() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());

    let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
    let rels: Vec<_> = root
        .walk()
        .map(|e| e.relative_to(root.path()).unwrap())
        .collect();

    assert_eq!(rels[0], std::path::Path::new("a.txt"));
    assert_eq!(rels[2], std::path::Path::new("b").join("c.txt"));
}

/// Test rename then delete through the tree API
#[test]
fn test_rename_then_recursive_delete() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());

    let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
    let b = root.get_child("b").cloned().unwrap();

    let renamed = b.rename("renamed").unwrap();
    assert_eq!(renamed.name(), "renamed");
    assert!(temp_dir.path().join("renamed").join("c.txt").exists());
    assert!(!temp_dir.path().join("b").exists());

    let non_recursive = renamed.clone().delete(DeleteMode::NonRecursive);
    assert!(non_recursive.is_err());
    assert!(temp_dir.path().join("renamed").exists());

    renamed.delete(DeleteMode::Recursive).unwrap();
    assert!(!temp_dir.path().join("renamed").exists());
}
