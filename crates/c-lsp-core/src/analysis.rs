//! Document analysis pipeline.
//!
//! [`Analyzer`] owns the parser engine, the tree cache and the diagnostics
//! store, and runs parse → cache → extract → record → snapshot for every
//! document event. Opening and changing a document are the same event: both
//! carry the full text and both trigger a full reparse.
//!
//! The cache and the store each sit behind their own mutex so one analyzer
//! can be shared between concurrent protocol handlers. A document event holds
//! the store lock from the version check until the snapshot, and takes the
//! cache lock inside it, so a refused stale event never touches the cache.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tree_sitter::Tree;

use crate::diagnostics::{extract_diagnostics, internal_error_diagnostic};
use crate::parser::{ParserEngine, ParserError};
use crate::store::{DiagnosticsStore, SnapshotEntry, WritePolicy};
use crate::tree_cache::TreeCache;
use crate::types::{Diagnostic, PositionEncoding};

/// Settings for an [`Analyzer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Unit for diagnostic columns.
    pub encoding: PositionEncoding,
    /// How the diagnostics store treats out-of-order versions.
    pub write_policy: WritePolicy,
}

/// Per-instance analysis state for a set of open documents.
#[derive(Debug)]
pub struct Analyzer {
    config: AnalyzerConfig,
    engine: ParserEngine,
    trees: Mutex<TreeCache>,
    store: Mutex<DiagnosticsStore>,
}

impl Analyzer {
    /// Create an analyzer with no documents.
    pub fn new(config: AnalyzerConfig) -> Result<Self, ParserError> {
        Ok(Self {
            config,
            engine: ParserEngine::new()?,
            trees: Mutex::new(TreeCache::new()),
            store: Mutex::new(DiagnosticsStore::new(config.write_policy)),
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze the full text of `uri` at `version` and return the
    /// diagnostics of every tracked document.
    ///
    /// The returned snapshot includes whatever was last recorded for other
    /// documents.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use c_lsp_core::{Analyzer, AnalyzerConfig};
    ///
    /// let analyzer = Analyzer::new(AnalyzerConfig::default())?;
    /// for entry in analyzer.on_document_event("file:///main.c", b"int main(", 1) {
    ///     println!("{} v{}: {} diagnostics", entry.uri, entry.version, entry.diagnostics.len());
    /// }
    /// ```
    pub fn on_document_event(&self, uri: &str, source: &[u8], version: i32) -> Vec<SnapshotEntry> {
        tracing::info!(uri, version, bytes = source.len(), "parsing document");
        let parsed = self.engine.parse(source);

        let mut store = lock(&self.store);
        if let Err(err) = store.check_version(uri, version) {
            tracing::warn!("{err}");
            return store.snapshot_all();
        }

        let diagnostics = self.cache_and_extract(uri, parsed, source);
        tracing::debug!(uri, version, count = diagnostics.len(), "extracted diagnostics");

        if let Err(err) = store.record(uri, version, diagnostics) {
            tracing::warn!("{err}");
        }
        store.snapshot_all()
    }

    /// Forget `uri`: drop its tree and its diagnostics.
    pub fn close(&self, uri: &str) {
        let mut store = lock(&self.store);
        let mut trees = lock(&self.trees);
        trees.remove(uri);
        store.remove(uri);
        tracing::info!(
            uri,
            open_trees = trees.len(),
            tracked = store.len(),
            "closed document"
        );
    }

    /// The diagnostics of every tracked document.
    pub fn snapshot(&self) -> Vec<SnapshotEntry> {
        lock(&self.store).snapshot_all()
    }

    /// Run `f` on the cached tree for `uri`, if any.
    ///
    /// The cache stays locked while `f` runs.
    pub fn with_tree<R>(&self, uri: &str, f: impl FnOnce(&Tree) -> R) -> Option<R> {
        lock(&self.trees).get(uri).map(f)
    }

    fn cache_and_extract(
        &self,
        uri: &str,
        parsed: Result<Tree, ParserError>,
        source: &[u8],
    ) -> Vec<Diagnostic> {
        let mut trees = lock(&self.trees);
        match parsed {
            Ok(tree) => {
                let tree = trees.put(uri, tree);
                tracing::trace!(uri, tree = %tree.root_node().to_sexp(), "syntax tree");
                extract_diagnostics(tree, source, self.config.encoding)
            }
            Err(err) => {
                tracing::warn!(uri, "{err}");
                // Keep the cache from pairing an old tree with the new version.
                trees.remove(uri);
                vec![internal_error_diagnostic(&err)]
            }
        }
    }
}

/// Lock `mutex`, recovering the data if another handler panicked while
/// holding it. Neither map is ever left half-updated.
///
/// Lock order is store, then cache.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
