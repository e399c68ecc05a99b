//! Shared snapshot types and serialization for the belief contagion simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Downstream consumers (charts, network views, exports) depend on it
//! without pulling in the engine.

pub mod snapshot;
pub mod state;

pub use snapshot::{AgentView, BeliefSummary, EdgeView, GraphSnapshot, Snapshot};
pub use state::AgentState;
