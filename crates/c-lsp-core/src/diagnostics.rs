//! Diagnostic extraction from C syntax trees.
//!
//! Every `ERROR` node in the tree becomes exactly one diagnostic spanning the
//! node. The walk is preorder and does not descend into an `ERROR` node, so
//! the output is in document order and no diagnostic range is nested inside
//! another.
//!
//! `MISSING` nodes (tokens tree-sitter inserted during recovery) are not
//! reported.

use crate::line_index::LineIndex;
use crate::parser::ParserError;
use crate::types::{Diagnostic, DiagnosticSeverity, Position, PositionEncoding, Range};
use c_treesitter_ast::{TraversePhase, topdown_traverse_concrete_tree};
use tree_sitter::{Node, Tree};

/// Node kind tree-sitter uses for unparseable spans.
pub const ERROR_NODE_KIND: &str = "ERROR";

/// Message attached to every syntax error diagnostic.
pub const SYNTAX_ERROR_MESSAGE: &str = "Failed to parse";

/// Code attached to every syntax error diagnostic.
pub const SYNTAX_ERROR_CODE: &str = "syntax-error";

/// Code attached to the diagnostic that replaces a missing tree.
pub const INTERNAL_ERROR_CODE: &str = "internal-error";

/// Get the syntax error diagnostics for a tree.
///
/// `source` must be the exact bytes `tree` was parsed from; it is only used
/// to express columns in `encoding`.
///
/// # Example
///
/// ```rust,ignore
/// use c_lsp_core::{ParserEngine, PositionEncoding, extract_diagnostics};
///
/// let source = b"int main( { return 0; }";
/// let tree = ParserEngine::new()?.parse(source)?;
/// for diag in extract_diagnostics(&tree, source, PositionEncoding::Utf16) {
///     println!("{}:{} {}", diag.range.start.line, diag.range.start.character, diag.message);
/// }
/// ```
pub fn extract_diagnostics(
    tree: &Tree,
    source: &[u8],
    encoding: PositionEncoding,
) -> Vec<Diagnostic> {
    let line_index = LineIndex::new(source);
    let mut diagnostics = Vec::new();

    topdown_traverse_concrete_tree(&mut tree.walk(), &mut |node, phase| {
        if phase == TraversePhase::Exit {
            return false;
        }
        if node.kind() != ERROR_NODE_KIND {
            return true;
        }
        tracing::debug!(
            start = ?node.start_position(),
            end = ?node.end_position(),
            "error node"
        );
        diagnostics.push(syntax_error(node, &line_index, encoding));
        false
    });

    diagnostics
}

/// Build the diagnostic for one `ERROR` node.
fn syntax_error(node: &Node, line_index: &LineIndex, encoding: PositionEncoding) -> Diagnostic {
    let range = Range::new(
        line_index.position(node.start_position(), encoding),
        line_index.position(node.end_position(), encoding),
    );
    Diagnostic::new(range, DiagnosticSeverity::Error, SYNTAX_ERROR_MESSAGE)
        .with_code(SYNTAX_ERROR_CODE)
}

/// The diagnostic reported in place of syntax errors when the engine could not
/// produce a tree at all.
pub fn internal_error_diagnostic(err: &ParserError) -> Diagnostic {
    Diagnostic::new(
        Range::point(Position::default()),
        DiagnosticSeverity::Error,
        format!("Internal error: {err}"),
    )
    .with_code(INTERNAL_ERROR_CODE)
}
