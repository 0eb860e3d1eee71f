//! The C parser engine.
//!
//! Every call performs a full parse with a freshly configured
//! `tree_sitter::Parser`; no previous tree is ever handed to tree-sitter, so
//! the result depends on the input bytes alone.

use thiserror::Error;
use tree_sitter::{Language, LanguageError, Parser, Tree};

/// Errors from the parser engine.
///
/// Malformed source is never an error: it shows up as `ERROR` nodes in the
/// returned tree.
#[derive(Debug, Error)]
pub enum ParserError {
    /// The C grammar is incompatible with the linked tree-sitter runtime.
    #[error("failed to load the C grammar: {0}")]
    Language(#[from] LanguageError),

    /// tree-sitter returned no tree at all.
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Turns C source bytes into a tree-sitter syntax tree.
#[derive(Debug, Clone)]
pub struct ParserEngine {
    language: Language,
}

impl ParserEngine {
    /// Create an engine for the C grammar, checking that it can be loaded.
    pub fn new() -> Result<Self, ParserError> {
        let language: Language = tree_sitter_c::LANGUAGE.into();
        Parser::new().set_language(&language)?;
        Ok(Self { language })
    }

    /// Parse `source` into a tree covering the whole input.
    ///
    /// Any byte sequence, including invalid UTF-8, yields a tree.
    pub fn parse(&self, source: &[u8]) -> Result<Tree, ParserError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        parser.parse(source, None).ok_or(ParserError::NoTree)
    }
}
