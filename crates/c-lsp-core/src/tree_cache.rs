//! Per-document syntax tree cache.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tree_sitter::Tree;

/// Most recent syntax tree for each open document, keyed by URI.
///
/// Trees are replaced wholesale on every parse and never edited in place.
/// There is no eviction; an entry lives until [`TreeCache::remove`].
#[derive(Debug, Default)]
pub struct TreeCache {
    trees: HashMap<String, Tree>,
}

impl TreeCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `tree` for `uri`, discarding any previous tree, and return the
    /// stored tree.
    pub fn put(&mut self, uri: impl Into<String>, tree: Tree) -> &Tree {
        match self.trees.entry(uri.into()) {
            Entry::Occupied(mut entry) => {
                entry.insert(tree);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(tree),
        }
    }

    /// Get the current tree for `uri`.
    pub fn get(&self, uri: &str) -> Option<&Tree> {
        self.trees.get(uri)
    }

    /// Drop the tree for `uri`, returning it if one was cached.
    pub fn remove(&mut self, uri: &str) -> Option<Tree> {
        self.trees.remove(uri)
    }

    /// Get the number of cached trees.
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
