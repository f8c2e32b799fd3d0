//! Selection and availability rules
//!
//! Answers "what can the player pick right now" and applies selections. All
//! operations are pure functions over a graph and a traversal state: the
//! graph is only read, and only [`select`] and [`mark_cleared`] mutate the
//! state. A host embedding this in a frame loop serializes calls on its
//! update thread; nothing here blocks or suspends.
//!
//! # Lifecycle
//!
//! ```text
//! NotStarted --select(start)--> InProgress --select(..)--> ... --select(boss)--> AtBoss
//!                                                     AtBoss --mark_cleared(boss)--> Cleared
//! ```
//!
//! Clearing a node is reported by the round dispatcher after the encounter
//! concludes successfully; a selection alone never clears anything. Defeat
//! has no transition: the host drops the run instead.

use super::error::{ProgressionError, ProgressionResult};
use super::state::ProgressionState;
use crate::graph::{MapGraph, NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Handoff value for the round dispatcher, produced by a successful
/// [`select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRequest {
    /// The node the player moved to; hand it back to [`mark_cleared`] when
    /// the round concludes successfully
    pub node: NodeId,
    /// What kind of round to start
    pub kind: NodeKind,
    /// True when this selection enters the final fight
    pub is_boss: bool,
}

/// Observable position in the run's lifecycle, derived from graph + state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// No node selected yet; only the start is on offer
    NotStarted,
    /// Somewhere between the start and the boss
    InProgress,
    /// The boss fight has been entered but not yet won
    AtBoss,
    /// The boss has been cleared; the run is over
    Cleared,
}

/// Returns the nodes the player may pick right now
///
/// Before the first selection this is the start node alone (or nothing if
/// the start is already cleared); afterwards it is the current node's
/// uncleared successors, in outgoing-edge order.
pub fn selectable(graph: &MapGraph, state: &ProgressionState) -> ProgressionResult<Vec<NodeId>> {
    match state.current() {
        None => {
            if state.is_cleared(graph.start()) {
                Ok(Vec::new())
            } else {
                Ok(vec![graph.start()])
            }
        }
        Some(current) => {
            let successors = graph.successors(current)?;
            Ok(successors
                .iter()
                .copied()
                .filter(|&node| !state.is_cleared(node))
                .collect())
        }
    }
}

/// Returns true if `target` is currently on offer
pub fn is_selectable(
    graph: &MapGraph,
    state: &ProgressionState,
    target: NodeId,
) -> ProgressionResult<bool> {
    Ok(selectable(graph, state)?.contains(&target))
}

/// Applies a player selection and hands back the round to dispatch
///
/// Moves the player onto `target` without clearing it; clearing happens only
/// when the dispatcher reports the round complete via [`mark_cleared`].
///
/// Fails with [`ProgressionError::NotSelectable`] if `target` is not on
/// offer, leaving the state unmodified.
pub fn select(
    graph: &MapGraph,
    state: &mut ProgressionState,
    target: NodeId,
) -> ProgressionResult<RoundRequest> {
    let node = graph.node(target)?;
    if !is_selectable(graph, state, target)? {
        return Err(ProgressionError::NotSelectable { node: target });
    }

    state.set_current(target);
    let request = RoundRequest {
        node: target,
        kind: node.kind(),
        is_boss: target == graph.boss(),
    };
    info!(node = %target, kind = %request.kind, is_boss = request.is_boss, "node selected");
    Ok(request)
}

/// Records that the encounter on `node` concluded successfully
///
/// Idempotent: clearing an already-cleared node changes nothing. Called by
/// the round dispatcher exactly once per victory, never on defeat.
pub fn mark_cleared(
    graph: &MapGraph,
    state: &mut ProgressionState,
    node: NodeId,
) -> ProgressionResult<()> {
    graph.node(node)?;
    if state.insert_cleared(node) {
        debug!(node = %node, "node cleared");
    }
    Ok(())
}

/// Derives the run's lifecycle phase
pub fn phase(graph: &MapGraph, state: &ProgressionState) -> RunPhase {
    match state.current() {
        None => RunPhase::NotStarted,
        Some(current) if current == graph.boss() => {
            if state.is_cleared(current) {
                RunPhase::Cleared
            } else {
                RunPhase::AtBoss
            }
        }
        Some(_) => RunPhase::InProgress,
    }
}
