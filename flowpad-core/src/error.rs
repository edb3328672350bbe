//! Error types for diagram operations.

use thiserror::Error;

use crate::NodeId;

/// Result type for diagram operations.
pub type DiagramResult<T> = Result<T, DiagramError>;

/// Errors that can occur in diagram operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// Node creation requested with a shape name that is not recognised.
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// Edge requested from a node to itself.
    #[error("Self loop on node {0}")]
    SelfLoop(NodeId),

    /// Node not found in the diagram.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// A line of an event script could not be parsed.
    #[error("Invalid event on script line {line}: {source}")]
    Script {
        /// One-based line number.
        line: usize,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
