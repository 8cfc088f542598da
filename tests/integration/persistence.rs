//! Integration tests for saving and loading snapshot files

use super::test_utils::sample_tree;
use dirsnap::error::SnapshotError;
use dirsnap::snapshot::{compare, open_store, snapshot, SnapshotFormat, SNAPSHOT_FORMAT_VERSION};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Test that a saved snapshot still verifies the tree it came from, in both formats
#[test]
fn test_saved_snapshot_verifies_original_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir(&root).unwrap();
    sample_tree(&root);

    let snap = snapshot(&root).unwrap();
    for (file, format) in [
        ("base.json", SnapshotFormat::Json),
        ("base.bin", SnapshotFormat::Bincode),
    ] {
        let path = temp_dir.path().join(file);
        let store = open_store(SnapshotFormat::for_path(&path, SnapshotFormat::Json));
        store.save(&snap, &path).unwrap();

        let loaded = open_store(format).load(&path).unwrap();
        assert_eq!(loaded.version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(loaded.total_size, 15);
        assert!(compare(&root, &loaded.entries).unwrap().is_correct());
    }
}

/// Test that the JSON document lists entries with portable relative paths
#[test]
fn test_json_document_schema() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir(&root).unwrap();
    sample_tree(&root);

    let path = temp_dir.path().join("base.json");
    open_store(SnapshotFormat::Json)
        .save(&snapshot(&root).unwrap(), &path)
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["version"], 1);
    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["path"], "b/c.txt");
    assert_eq!(entries[2]["kind"], "file");
    assert_eq!(entries[2]["size"], 10);
    assert_eq!(entries[1]["kind"], "directory");
}

/// Test that saving creates missing parent directories
#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    sample_tree(temp_dir.path());
    let snap = snapshot(temp_dir.path()).unwrap();

    let path = temp_dir.path().join("nested").join("deeper").join("snap.json");
    open_store(SnapshotFormat::Json).save(&snap, &path).unwrap();
    assert!(path.exists());
}

/// Test load failures map to distinct snapshot errors
#[test]
fn test_load_failures() {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(SnapshotFormat::Json);

    let missing = store.load(&temp_dir.path().join("none.json"));
    assert!(matches!(missing, Err(SnapshotError::NotFound(_))));

    let corrupt = temp_dir.path().join("corrupt.json");
    fs::write(&corrupt, "{ not json").unwrap();
    assert!(matches!(
        store.load(&corrupt),
        Err(SnapshotError::Serialization(_))
    ));

    let future = temp_dir.path().join("future.json");
    write_future_version(&future);
    assert!(matches!(
        store.load(&future),
        Err(SnapshotError::UnsupportedVersion(99))
    ));
}

fn write_future_version(path: &Path) {
    let doc = serde_json::json!({
        "version": 99,
        "created_at": "2026-01-01T00:00:00Z",
        "root": "/tmp/x",
        "total_size": 0,
        "entries": []
    });
    fs::write(path, serde_json::to_vec(&doc).unwrap()).unwrap();
}
