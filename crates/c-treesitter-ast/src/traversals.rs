/*
 * traversals.rs
 *
 * Copyright (c) 2025 Posit, PBC
 *
 * Generic traversal helpers for tree-sitter TreeCursor.
 *
 * These work with any tree-sitter grammar. The work-stack replaces
 * recursion, so nesting depth is bounded only by heap memory.
 */

use tree_sitter::{Node, TreeCursor};

/// Phase of tree traversal - whether we're entering or exiting a node.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum TraversePhase {
    Enter,
    Exit,
}

/// Pending cursor work for [`topdown_traverse_concrete_tree`].
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Visit the node under the cursor.
    Visit,
    /// Try to move to the next sibling and visit it.
    NextSibling,
    /// Return the cursor to the parent after the last sibling.
    GoToParent,
    /// Fire the exit callback for the node under the cursor.
    Exit,
}

/// Top-down (preorder) traversal of a tree-sitter tree.
///
/// Visits each node twice: once on entry (before children) and once on exit
/// (after children). The visitor returns `true` to descend into children,
/// `false` to skip them. A skipped node still receives its `Exit` call.
///
/// Siblings are visited left to right, so `Enter` calls arrive in document
/// order.
///
/// # Arguments
/// * `cursor` - A tree-sitter cursor positioned at the starting node
/// * `visitor` - A function called for each node with the node and phase
///
/// # Example
/// ```ignore
/// topdown_traverse_concrete_tree(&mut cursor, &mut |node, phase| {
///     println!("{:?}: {}", phase, node.kind());
///     true // descend into children
/// });
/// ```
pub fn topdown_traverse_concrete_tree<F>(cursor: &mut TreeCursor, visitor: &mut F)
where
    F: for<'a> FnMut(&'a Node, TraversePhase) -> bool,
{
    let mut stack: Vec<Step> = vec![Step::Visit];
    while let Some(step) = stack.pop() {
        match step {
            Step::Visit => {
                stack.push(Step::Exit);
                if visitor(&cursor.node(), TraversePhase::Enter) && cursor.goto_first_child() {
                    stack.push(Step::GoToParent);
                    stack.push(Step::NextSibling);
                    stack.push(Step::Visit);
                }
            }
            Step::GoToParent => {
                cursor.goto_parent();
            }
            Step::Exit => {
                visitor(&cursor.node(), TraversePhase::Exit);
            }
            Step::NextSibling => {
                if cursor.goto_next_sibling() {
                    stack.push(Step::NextSibling);
                    stack.push(Step::Visit);
                }
            }
        }
    }
}
