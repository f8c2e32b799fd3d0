//! Poreia: branching-map generation and run progression
//!
//! `poreia` (πορεία, Greek for "march" or "journey") is the map subsystem of
//! a roguelike card-battler: it synthesizes the left-to-right branching map
//! a run is played on and drives the traversal state machine that decides
//! which encounter the player may enter next.
//!
//! # Features
//!
//! - **Layered DAG generation**: randomized maps with guaranteed
//!   reachability of every node and a unique boss sink
//! - **Deterministic seeds**: the same configuration and seed always
//!   reproduce the same map, for save and replay consistency
//! - **Reactive progression**: a pure, single-threaded controller that
//!   answers "what is selectable now" and applies selections
//! - **Snapshot-friendly**: every value type serializes with serde
//!
//! # Quick Start
//!
//! ```
//! use poreia::{GeneratorConfig, RunContext, RunPhase};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut run = RunContext::generate(GeneratorConfig::default(), 42)?;
//!
//! // Only the start node is on offer before the first pick.
//! let offered = run.selectable()?;
//! assert_eq!(offered, vec![run.graph().start()]);
//!
//! let request = run.select(offered[0])?;
//! assert!(!request.is_boss);
//!
//! // The round dispatcher reports back on victory:
//! run.mark_cleared(request.node)?;
//! assert_eq!(run.phase(), RunPhase::InProgress);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! Each module hides a design decision likely to change:
//!
//! - [`graph`]: map synthesis and the layered DAG (hides the graph
//!   representation and the repair strategy)
//! - [`progression`]: selection rules and the traversal record (hides how
//!   availability is computed)
//! - [`run`]: per-run ownership of graph + state (hides nothing, exists so
//!   hosts don't reach for singletons)
//!
//! # Boundaries
//!
//! Rendering, scene switching, deck mechanics and combat resolution are
//! external collaborators: the renderer reads nodes, edges and the
//! selectable set; the round dispatcher consumes
//! [`RoundRequest`](progression::RoundRequest) values and reports cleared
//! encounters back.

pub mod graph;
pub mod progression;
pub mod run;

pub use graph::{
    BuildError, BuildResult, GeneratorConfig, GraphError, GraphResult, MapGraph, MapGraphBuilder,
    Node, NodeId, NodeKind,
};
pub use progression::{
    ProgressionError, ProgressionResult, ProgressionState, RoundRequest, RunPhase,
};
pub use run::RunContext;

// Re-export dependencies used in the public API so hosts don't hit version
// mismatch errors.
pub use serde;
