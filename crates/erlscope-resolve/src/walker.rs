//! Breadth-first scope traversal.
//!
//! Declarations closer to the scope root win over deeper ones, so the walk
//! is level-order: a queue seeded with the scope node, children enqueued in
//! source order. The cancel token is polled once per dequeued node.

use crate::cancel::CancelToken;
use erlscope_syntax::{NodeId, SyntaxTree};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    Continue,
    Stop,
}

pub trait ScopeVisitor {
    fn visit(&mut self, tree: &SyntaxTree, node: NodeId) -> Visit;
}

/// Walks the subtree under `scope` breadth-first. Returns `true` when the
/// walk ran to completion, `false` when the visitor stopped it or the token
/// was cancelled.
pub fn walk_scope(
    tree: &SyntaxTree,
    scope: NodeId,
    cancel: &CancelToken,
    visitor: &mut dyn ScopeVisitor,
) -> bool {
    let mut queue = VecDeque::from([scope]);
    while let Some(node) = queue.pop_front() {
        if cancel.is_cancelled() {
            log::trace!("scope walk cancelled at node {node:?}");
            return false;
        }
        match visitor.visit(tree, node) {
            Visit::Stop => return false,
            Visit::Continue => {}
        }
        queue.extend(tree.children(node));
    }
    true
}
