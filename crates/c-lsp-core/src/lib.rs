//! Transport-agnostic syntax analysis for C documents.
//!
//! This crate keeps a live tree-sitter syntax tree for every open document
//! and turns the tree's `ERROR` nodes into diagnostics. It has no LSP
//! protocol dependencies; `c-lsp-server` wraps it for editors.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Analyzer (analysis.rs)                      │
//! │  on_document_event: parse → cache → extract → record → snapshot  │
//! └──────────────────────────────────────────────────────────────────┘
//!        │                │                 │                │
//!        ▼                ▼                 ▼                ▼
//! ┌─────────────┐ ┌──────────────┐ ┌────────────────┐ ┌──────────────┐
//! │ParserEngine │ │  TreeCache   │ │ extract_       │ │ Diagnostics  │
//! │ (parser.rs) │ │(tree_cache.rs)│ │ diagnostics    │ │ Store        │
//! │             │ │              │ │(diagnostics.rs)│ │ (store.rs)   │
//! └─────────────┘ └──────────────┘ └────────────────┘ └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use c_lsp_core::{Analyzer, AnalyzerConfig};
//!
//! let analyzer = Analyzer::new(AnalyzerConfig::default())?;
//!
//! // Open and change events are handled the same way.
//! let snapshot = analyzer.on_document_event("file:///main.c", source.as_bytes(), 1);
//! for entry in snapshot {
//!     println!("{} (v{}): {} diagnostics", entry.uri, entry.version, entry.diagnostics.len());
//! }
//! ```

pub mod analysis;
pub mod diagnostics;
pub mod line_index;
pub mod parser;
pub mod store;
pub mod tree_cache;
pub mod types;

// Re-export main types and functions for convenience
pub use analysis::{Analyzer, AnalyzerConfig};
pub use diagnostics::extract_diagnostics;
pub use line_index::LineIndex;
pub use parser::{ParserEngine, ParserError};
pub use store::{DiagnosticsStore, SnapshotEntry, StoreError, WritePolicy};
pub use tree_cache::TreeCache;
pub use types::{Diagnostic, DiagnosticSeverity, Position, PositionEncoding, Range};
