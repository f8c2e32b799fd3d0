//! Map - the layered encounter DAG for one run
//!
//! This module provides the core data structures for representing a
//! generated map: typed encounter nodes arranged in left-to-right layers,
//! with edges stored as node ids.
//!
//! # Design
//!
//! Nodes live in a single `Vec` indexed by [`NodeId`]; each node carries its
//! own outgoing edge list. This arena layout mirrors how edges are consumed
//! (walk forward from the current node) and avoids back-references entirely.
//! In-degrees are computed on demand; only the generator and the validator
//! need them.
//!
//! # Invariants
//!
//! A graph assembled by the builder always satisfies:
//!
//! 1. `start` has in-degree 0 and is alone in layer 0
//! 2. Every other node has in-degree >= 1
//! 3. `boss` is the unique sink; every other node has out-degree >= 1
//! 4. Every edge points to a strictly later layer (acyclic by construction)
//! 5. Exactly one `Shop` and one `Rest` node exist, both in middle layers
//!
//! [`MapGraph::validate`] re-checks all of the above.

use super::error::{GraphError, GraphResult};
use super::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// The kind of encounter a node hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// An ordinary fight
    Combat,
    /// A harder fight with better rewards
    Elite,
    /// The shop room
    Shop,
    /// The rest room
    Rest,
    /// The final fight; always the unique sink of the map
    Boss,
}

impl NodeKind {
    /// True for kinds that start a fight rather than a service room
    pub fn is_encounter(self) -> bool {
        matches!(self, NodeKind::Combat | NodeKind::Elite | NodeKind::Boss)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::Combat => "Combat",
            NodeKind::Elite => "Elite",
            NodeKind::Shop => "Shop",
            NodeKind::Rest => "Rest",
            NodeKind::Boss => "Boss",
        };
        write!(f, "{label}")
    }
}

/// One encounter location in the map
///
/// The position is advisory: the renderer places the node's widget there and
/// the generator uses vertical distance to pick edges, but graph queries
/// never depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    layer: u32,
    position: (f32, f32),
    kind: NodeKind,
    /// Outgoing edges in the order they were added; duplicate-free
    outgoing: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, layer: u32, position: (f32, f32), kind: NodeKind) -> Self {
        Self {
            id,
            layer,
            position,
            kind,
            outgoing: Vec::new(),
        }
    }

    /// Returns the node's id
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the generation layer this node belongs to
    pub fn layer(&self) -> u32 {
        self.layer
    }

    /// Returns the advisory layout position `(x, y)`
    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    /// Returns the encounter kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the outgoing edges in insertion order
    pub fn outgoing(&self) -> &[NodeId] {
        &self.outgoing
    }

    /// Returns the number of outgoing edges
    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    /// Adds an outgoing edge; returns false if it was already present
    pub(crate) fn push_outgoing(&mut self, target: NodeId) -> bool {
        if self.outgoing.contains(&target) {
            return false;
        }
        self.outgoing.push(target);
        true
    }
}

/// The immutable, generated layered DAG for one run
///
/// Produced once per run by [`MapGraphBuilder`](super::MapGraphBuilder) and
/// owned by whatever orchestrates the run; progression only ever reads it.
///
/// # Example
///
/// ```
/// use poreia::{GeneratorConfig, MapGraphBuilder};
///
/// let graph = MapGraphBuilder::new(GeneratorConfig::default())
///     .generate(7)
///     .unwrap();
///
/// // The boss is the unique sink.
/// let boss = graph.node(graph.boss()).unwrap();
/// assert_eq!(boss.out_degree(), 0);
/// assert!(graph.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapGraph {
    /// All nodes in generation order, indexed by [`NodeId`]
    nodes: Vec<Node>,
    start: NodeId,
    boss: NodeId,
}

impl MapGraph {
    pub(crate) fn from_parts(nodes: Vec<Node>, start: NodeId, boss: NodeId) -> Self {
        Self { nodes, start, boss }
    }

    /// Returns the number of nodes in the map
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the map has no nodes (never the case for a built map)
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the entry node's id
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Returns the boss node's id
    pub fn boss(&self) -> NodeId {
        self.boss
    }

    /// Returns true if `id` names a node of this map
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Returns the node for `id`, or `None` if the id is out of bounds
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the node for `id`
    ///
    /// Fails with [`GraphError::UnknownNode`] if the id does not belong to
    /// this map.
    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.get(id).ok_or(GraphError::UnknownNode { node: id })
    }

    /// Returns an iterator over all nodes in generation order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns the outgoing edges of `id`
    pub fn successors(&self, id: NodeId) -> GraphResult<&[NodeId]> {
        Ok(self.node(id)?.outgoing())
    }

    /// Returns an iterator over all edges as `(from, to)` pairs
    ///
    /// This is the shape the renderer consumes for line drawing.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .flat_map(|node| node.outgoing.iter().map(move |&to| (node.id, to)))
    }

    /// Computes the in-degree of every node, indexed by [`NodeId`]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0usize; self.nodes.len()];
        for (_, to) in self.edges() {
            degrees[to.index()] += 1;
        }
        degrees
    }

    /// Returns the number of layers including the boss layer
    pub fn layer_count(&self) -> u32 {
        self.nodes.iter().map(|n| n.layer).max().unwrap_or(0) + 1
    }

    /// Marks every node reachable from `start` by walking outgoing edges
    fn reachable_from_start(&self) -> Vec<bool> {
        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::new();
        if self.contains(self.start) {
            seen[self.start.index()] = true;
            queue.push_back(self.start);
        }
        while let Some(id) = queue.pop_front() {
            for &next in self.nodes[id.index()].outgoing() {
                if self.contains(next) && !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Re-checks every structural invariant of the map
    ///
    /// The builder guarantees these at construction; this exists so tests
    /// and hosts restoring a snapshot can verify a graph independently.
    pub fn validate(&self) -> GraphResult<()> {
        if self.is_empty() {
            return Err(GraphError::invariant("map has no nodes"));
        }
        let start = self.node(self.start)?;
        let boss = self.node(self.boss)?;

        // Edge targets must exist and point to a strictly later layer.
        for node in &self.nodes {
            for &to in node.outgoing() {
                let target = self.node(to)?;
                if target.layer <= node.layer {
                    return Err(GraphError::invariant(format!(
                        "edge {} -> {} does not advance the layer ({} -> {})",
                        node.id, to, node.layer, target.layer
                    )));
                }
            }
        }

        if start.layer != 0 {
            return Err(GraphError::invariant("start node is not in layer 0"));
        }
        if self.nodes.iter().any(|n| n.layer == 0 && n.id != self.start) {
            return Err(GraphError::invariant("layer 0 holds more than the start"));
        }

        let degrees = self.in_degrees();
        if degrees[self.start.index()] != 0 {
            return Err(GraphError::invariant("start node has an entrance"));
        }
        for node in &self.nodes {
            if node.id != self.start && degrees[node.id.index()] == 0 {
                return Err(GraphError::invariant(format!(
                    "node {} has no entrance",
                    node.id
                )));
            }
        }

        if boss.kind() != NodeKind::Boss {
            return Err(GraphError::invariant("boss node is not of kind Boss"));
        }
        for node in &self.nodes {
            let is_sink = node.out_degree() == 0;
            if is_sink != (node.id == self.boss) {
                return Err(GraphError::invariant(format!(
                    "node {} breaks boss sink uniqueness",
                    node.id
                )));
            }
        }

        let boss_layer = boss.layer;
        for (kind, label) in [(NodeKind::Shop, "shop"), (NodeKind::Rest, "rest")] {
            let placed: Vec<&Node> = self.nodes.iter().filter(|n| n.kind == kind).collect();
            if placed.len() != 1 {
                return Err(GraphError::invariant(format!(
                    "expected exactly one {label} node, found {}",
                    placed.len()
                )));
            }
            let layer = placed[0].layer;
            if layer == 0 || layer >= boss_layer {
                return Err(GraphError::invariant(format!(
                    "{label} node sits in layer {layer}, outside the middle layers"
                )));
            }
        }

        let reachable = self.reachable_from_start();
        for node in &self.nodes {
            if !reachable[node.id.index()] {
                return Err(GraphError::invariant(format!(
                    "node {} is unreachable from start",
                    node.id
                )));
            }
        }

        Ok(())
    }
}
