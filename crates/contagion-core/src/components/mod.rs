//! Simulation Components
//!
//! Agents, contact edges, the population graph, belief profiles and the
//! social metric accumulators.

pub mod agent;
pub mod belief;
pub mod graph;
pub mod metrics;
pub mod world;

pub use agent::*;
pub use belief::*;
pub use graph::*;
pub use metrics::*;
pub use world::*;
