//! Map generation and the layered encounter DAG
//!
//! This module provides the data structures and algorithms for the run map:
//!
//! - Randomized, layer-by-layer construction with correctness repair
//! - Guaranteed reachability of every node from the start
//! - A unique boss sink every path converges to
//! - Invariant re-validation for restored snapshots
//!
//! # Design Principles
//!
//! The module hides the graph representation (arena of nodes with index
//! edges) and exposes only abstract operations: generate, look up a node,
//! walk successors, iterate edges, validate.

mod builder;
mod dot;
mod error;
mod map;
mod node_id;

pub use builder::{GeneratorConfig, MapGraphBuilder};
pub use error::{BuildError, BuildResult, GraphError, GraphResult};
pub use map::{MapGraph, Node, NodeKind};
pub use node_id::NodeId;
