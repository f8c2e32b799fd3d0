//! Run context - one run's graph and traversal state under a single owner
//!
//! Replaces the process-lifetime "game manager" singleton pattern: the host
//! constructs a [`RunContext`] at run start, passes it by reference to
//! whatever needs it, and drops it when the run ends or restarts. Defeat has
//! no transition here by design; a beaten run is simply dropped and a fresh
//! one generated.

use crate::graph::{BuildResult, GeneratorConfig, MapGraph, MapGraphBuilder, NodeId};
use crate::progression::{
    self, ProgressionResult, ProgressionState, RoundRequest, RunPhase,
};
use serde::{Deserialize, Serialize};

/// Everything one run owns: the generated map and the traversal record
///
/// # Example
///
/// ```
/// use poreia::{GeneratorConfig, RunContext, RunPhase};
///
/// let mut run = RunContext::generate(GeneratorConfig::default(), 42).unwrap();
/// assert_eq!(run.phase(), RunPhase::NotStarted);
///
/// let start = run.graph().start();
/// let request = run.select(start).unwrap();
/// // ... dispatch the round; on victory:
/// run.mark_cleared(request.node).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunContext {
    graph: MapGraph,
    state: ProgressionState,
}

impl RunContext {
    /// Starts a run on an already-generated map
    pub fn new(graph: MapGraph) -> Self {
        Self {
            graph,
            state: ProgressionState::new(),
        }
    }

    /// Generates a fresh map from `config` and `seed` and starts a run on it
    pub fn generate(config: GeneratorConfig, seed: u64) -> BuildResult<Self> {
        let graph = MapGraphBuilder::new(config).generate(seed)?;
        Ok(Self::new(graph))
    }

    /// The run's map
    pub fn graph(&self) -> &MapGraph {
        &self.graph
    }

    /// The run's traversal record
    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// See [`progression::selectable`]
    pub fn selectable(&self) -> ProgressionResult<Vec<NodeId>> {
        progression::selectable(&self.graph, &self.state)
    }

    /// See [`progression::select`]
    pub fn select(&mut self, target: NodeId) -> ProgressionResult<RoundRequest> {
        progression::select(&self.graph, &mut self.state, target)
    }

    /// See [`progression::mark_cleared`]
    pub fn mark_cleared(&mut self, node: NodeId) -> ProgressionResult<()> {
        progression::mark_cleared(&self.graph, &mut self.state, node)
    }

    /// See [`progression::phase`]
    pub fn phase(&self) -> RunPhase {
        progression::phase(&self.graph, &self.state)
    }
}
