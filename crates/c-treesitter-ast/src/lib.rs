/*
 * lib.rs
 *
 * Copyright (c) 2025 Posit, PBC
 *
 * c-treesitter-ast: grammar-agnostic tree-sitter utilities for c-lsp.
 *
 * Traversals here never recurse on the native call stack, so they are
 * safe to run on arbitrarily deep (including adversarial) parse trees.
 */

pub mod traversals;

pub use traversals::{TraversePhase, topdown_traverse_concrete_tree};
