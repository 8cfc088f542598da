//! Pre-order traversal over a scanned directory tree

use crate::tree::entry::{DirectoryEntry, Entry};
use std::iter::FusedIterator;
use std::slice;

/// Depth-first, pre-order iterator over every descendant of a directory.
///
/// A directory is yielded before any of its children, and its subtree is
/// exhausted before its next sibling. The root itself is not yielded.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<slice::Iter<'a, Entry>>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(root: &'a DirectoryEntry) -> Self {
        Self {
            stack: vec![root.children().iter()],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(entry) => {
                    if let Entry::Directory(dir) = entry {
                        self.stack.push(dir.children().iter());
                    }
                    return Some(entry);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl FusedIterator for Walk<'_> {}
