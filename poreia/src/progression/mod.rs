//! Run progression - traversal state and selection rules
//!
//! Consumes a generated [`MapGraph`](crate::MapGraph) and decides which
//! nodes the player may currently pick, applies selections, and records
//! cleared encounters. The module hides how availability is computed;
//! hosts only see the selectable set and the transition operations.

mod controller;
mod error;
mod state;

pub use controller::{is_selectable, mark_cleared, phase, select, selectable, RoundRequest, RunPhase};
pub use error::{ProgressionError, ProgressionResult};
pub use state::ProgressionState;
