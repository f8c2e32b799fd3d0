//! Node identifier type
//!
//! This module defines the NodeId type which uniquely identifies a node
//! within a generated map.
//!
//! # Design Decision
//!
//! A NodeId is a dense, zero-based index into the graph's node array rather
//! than a name or a pointer because:
//! 1. Edges stored as indices cannot form ownership cycles
//! 2. Index lookups are O(1) and need no hashing
//! 3. Generation order gives every run a stable, reproducible numbering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node within a [`MapGraph`](super::MapGraph)
///
/// Ids are assigned in generation order and are stable for the lifetime of
/// the graph they belong to. They carry no meaning across graphs: an id from
/// one run's map must not be used against another run's map.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates an id for the node at `index` in the graph's node array
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the id as an index into the graph's node array
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}
