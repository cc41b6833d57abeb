//! Structural invariant violations reported by `validate`.

use crate::arena::NodeId;
use thiserror::Error;

/// Result type alias for trie validation.
pub type Result<T> = std::result::Result<T, InvariantError>;

/// A broken structural invariant of a compressed trie.
///
/// A correctly functioning trie never produces any of these. They exist so that tests and callers
/// that suspect corruption can ask for a precise description instead of a panic.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum InvariantError {
    #[error("invariant violated: two edges of node {0:?} share a first symbol")]
    OverlappingEdges(NodeId),

    #[error("invariant violated: node {0:?} has an edge with an empty label")]
    EmptyLabel(NodeId),

    #[error("invariant violated: non-root node {0:?} has no parent")]
    MissingParent(NodeId),

    #[error("invariant violated: node {child:?} and parent {parent:?} are not linked both ways")]
    ParentMismatch { child: NodeId, parent: NodeId },

    #[error("invariant violated: non-root node {0:?} is a childless non-endpoint")]
    DanglingLeaf(NodeId),

    #[error("invariant violated: node {0:?} is allocated but unreachable from the root")]
    UnreachableNode(NodeId),

    #[error("invariant violated: {counted} endpoints found but length is {expected}")]
    LengthMismatch { counted: usize, expected: usize },
}
