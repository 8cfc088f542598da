//! Property-based tests over randomly generated directory trees

use dirsnap::snapshot::{compare, get_structure, RelPath};
use dirsnap::tree::{DirectoryEntry, FsEntry};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One generated item: a directory chain under the root and an optional file in it.
type Item = (Vec<u8>, Option<usize>);

fn tree_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (
            prop::collection::vec(0u8..3, 0..4),
            prop::option::of(0usize..64),
        ),
        0..12,
    )
}

/// Materialize `items` under `root`, returning the expected relative paths and total size.
fn build_tree(root: &Path, items: &[Item]) -> (BTreeSet<String>, u64) {
    let mut expected = BTreeSet::new();
    let mut total = 0u64;

    for (index, (chain, file_size)) in items.iter().enumerate() {
        let mut rel = String::new();
        for segment in chain {
            if !rel.is_empty() {
                rel.push('/');
            }
            rel.push_str(&format!("d{}", segment));
            expected.insert(rel.clone());
        }
        fs::create_dir_all(root.join(&rel)).unwrap();

        if let Some(size) = file_size {
            let name = format!("f{}.txt", index);
            fs::write(root.join(&rel).join(&name), vec![b'x'; *size]).unwrap();
            total += *size as u64;
            if rel.is_empty() {
                expected.insert(name);
            } else {
                expected.insert(format!("{}/{}", rel, name));
            }
        }
    }

    (expected, total)
}

/// Test that the walk visits every descendant exactly once, parents before children
#[test]
fn test_walk_visits_each_entry_once_in_preorder() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree_strategy(), |items| {
            let temp_dir = TempDir::new().unwrap();
            let (expected, _) = build_tree(temp_dir.path(), &items);

            let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
            let visited: Vec<RelPath> = root
                .walk()
                .map(|e| RelPath::from_path(&e.relative_to(root.path()).unwrap()).unwrap())
                .collect();

            let unique: BTreeSet<&str> = visited.iter().map(|p| p.as_str()).collect();
            prop_assert_eq!(unique.len(), visited.len());
            prop_assert_eq!(
                unique,
                expected.iter().map(String::as_str).collect::<BTreeSet<_>>()
            );

            for (position, path) in visited.iter().enumerate() {
                if let Some((parent, _)) = path.as_str().rsplit_once('/') {
                    let parent_position = visited.iter().position(|p| p.as_str() == parent);
                    prop_assert!(matches!(parent_position, Some(pp) if pp < position));
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Test that every directory's size equals the sum of its children's sizes
#[test]
fn test_directory_size_is_additive() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree_strategy(), |items| {
            let temp_dir = TempDir::new().unwrap();
            let (_, total) = build_tree(temp_dir.path(), &items);

            let root = DirectoryEntry::scan(temp_dir.path()).unwrap();
            prop_assert_eq!(root.size(), total);

            for entry in root.walk() {
                if let Some(dir) = entry.as_directory() {
                    let child_sum: u64 = dir.children().iter().map(|c| c.size()).sum();
                    prop_assert_eq!(dir.size(), child_sum);
                }
            }
            Ok(())
        })
        .unwrap();
}

/// Test that a tree compared against its own structure is correct, and rescans agree
#[test]
fn test_self_comparison_is_correct_and_stable() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree_strategy(), |items| {
            let temp_dir = TempDir::new().unwrap();
            build_tree(temp_dir.path(), &items);

            let first = get_structure(temp_dir.path()).unwrap();
            let second = get_structure(temp_dir.path()).unwrap();
            prop_assert_eq!(&first, &second);

            let comparison = compare(temp_dir.path(), &first).unwrap();
            prop_assert!(comparison.is_correct());
            Ok(())
        })
        .unwrap();
}
