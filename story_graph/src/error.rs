//! Error types for building, loading, and walking a story graph.

use thiserror::Error;

use crate::nodes::NodeId;

/// Errors raised by the story graph.
///
/// `Validation` and `Format` abort construction or loading before any graph is
/// exposed. The remaining variants indicate a corrupted or hand-edited graph and
/// are fatal to the session that hits them.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Inputs to construction (or generator output) are malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A persisted record is missing keys or carries an unknown discriminator.
    #[error("format error: {0}")]
    Format(String),

    /// A referenced node id is absent from the graph.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// An id resolved to a node of the wrong kind.
    #[error("node {id} is not a {expected} node")]
    UnexpectedKind { id: NodeId, expected: &'static str },

    /// A question node without exactly one parent and one child.
    #[error("question node {0} must have exactly one parent and one child")]
    DanglingQuestion(NodeId),

    /// A non-root node has no parent to walk back through.
    #[error("node {0} has no parent")]
    ParentMissing(NodeId),

    /// A walk came back to a node it already visited.
    #[error("cycle detected at node {0}")]
    Cycle(NodeId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
