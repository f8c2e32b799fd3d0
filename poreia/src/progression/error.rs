//! Error types for progression operations

use crate::graph::{GraphError, NodeId};
use thiserror::Error;

/// Result type for progression operations
pub type ProgressionResult<T> = Result<T, ProgressionError>;

/// Errors that can occur while traversing the map
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressionError {
    /// The player picked a node the controller is not currently offering
    ///
    /// Recoverable: the host should re-render the selectable set and ignore
    /// the click. The traversal state is left untouched.
    #[error("node {node} is not selectable from the current position")]
    NotSelectable {
        /// The rejected node
        node: NodeId,
    },

    /// A graph-level failure, usually an id that belongs to another map
    #[error(transparent)]
    Graph(#[from] GraphError),
}
