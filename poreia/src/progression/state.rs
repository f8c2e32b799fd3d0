//! Traversal record for one run

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The mutable traversal record for one run
///
/// Tracks where the player currently is and which nodes they have already
/// cleared. Created fresh per run, kept alive by the host across view
/// transitions together with the graph it was created for, and discarded on
/// restart. It never outlives its graph's run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    current: Option<NodeId>,
    cleared: HashSet<NodeId>,
}

impl ProgressionState {
    /// Creates the state for a run that has not started yet
    pub fn new() -> Self {
        Self::default()
    }

    /// The node the player occupies; `None` before the first selection
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// The set of cleared nodes
    pub fn cleared(&self) -> &HashSet<NodeId> {
        &self.cleared
    }

    /// Returns true if `node` has been cleared
    pub fn is_cleared(&self, node: NodeId) -> bool {
        self.cleared.contains(&node)
    }

    pub(crate) fn set_current(&mut self, node: NodeId) {
        self.current = Some(node);
    }

    /// Idempotent insert; returns false if the node was already cleared
    pub(crate) fn insert_cleared(&mut self, node: NodeId) -> bool {
        self.cleared.insert(node)
    }
}
