//! Error types for map construction and graph queries
//!
//! This module hides error representation details and provides unified
//! error types for the graph module.

use super::NodeId;
use thiserror::Error;

/// Result type for map generation
pub type BuildResult<T> = Result<T, BuildError>;

/// Result type for graph queries
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised when the generator is handed a degenerate configuration
///
/// All of these are fatal for the generation attempt: no partial graph is
/// ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BuildError {
    /// The map needs at least a start layer and one ordinary layer
    #[error("map needs at least 2 layers, got {layer_count}")]
    TooFewLayers {
        /// The rejected layer count
        layer_count: u32,
    },

    /// The nodes-per-layer range would produce a layer with no nodes
    #[error("nodes-per-layer range [{min}, {max}] would produce an empty layer")]
    EmptyLayer {
        /// Configured minimum nodes per layer
        min: u32,
        /// Configured maximum nodes per layer
        max: u32,
    },

    /// A special-room layer range has its bounds reversed
    #[error("{room} layer range is inverted: [{lo}, {hi}]")]
    InvertedSpecialRange {
        /// Which room the range places ("shop" or "rest")
        room: &'static str,
        /// Lower bound of the rejected range
        lo: u32,
        /// Upper bound of the rejected range
        hi: u32,
    },

    /// A special-room layer range reaches the start or boss layer
    #[error("{room} layer range [{lo}, {hi}] must lie within [1, {last}]")]
    SpecialRangeOutOfBounds {
        /// Which room the range places ("shop" or "rest")
        room: &'static str,
        /// Lower bound of the rejected range
        lo: u32,
        /// Upper bound of the rejected range
        hi: u32,
        /// Last ordinary layer index for this configuration
        last: u32,
    },

    /// Shop and rest ranges share a layer, so both draws could land on it
    ///
    /// A shared layer could not satisfy the one-shop-one-rest guarantee, so
    /// the configuration is rejected up front.
    #[error(
        "shop layer range [{shop_lo}, {shop_hi}] overlaps rest layer range [{rest_lo}, {rest_hi}]"
    )]
    OverlappingSpecialRanges {
        /// Lower bound of the shop range
        shop_lo: u32,
        /// Upper bound of the shop range
        shop_hi: u32,
        /// Lower bound of the rest range
        rest_lo: u32,
        /// Upper bound of the rest range
        rest_hi: u32,
    },
}

/// Errors that can occur during graph queries
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// An id outside this graph was passed in
    ///
    /// Ids are only valid against the graph that produced them; seeing this
    /// error means the caller mixed up graphs or fabricated an id. It is a
    /// contract violation, not a condition to recover from at runtime.
    #[error("unknown node id: {node}")]
    UnknownNode {
        /// The id that was not found
        node: NodeId,
    },

    /// A structural invariant did not hold
    ///
    /// Returned by [`MapGraph::validate`](super::MapGraph::validate); a graph
    /// assembled by the builder never produces this.
    #[error("map invariant violated: {reason}")]
    InvariantViolated {
        /// Human-readable description of the broken invariant
        reason: String,
    },
}

impl GraphError {
    /// Creates an unknown-node error
    pub fn unknown_node(node: NodeId) -> Self {
        Self::UnknownNode { node }
    }

    /// Creates an invariant-violated error with the given reason
    pub fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolated {
            reason: reason.into(),
        }
    }
}
