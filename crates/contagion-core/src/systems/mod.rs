//! Simulation Systems
//!
//! The per-tick contagion step (transmission, recovery, aggregation) and
//! out-of-band outbreak injection.

pub mod aggregation;
pub mod outbreak;
pub mod recovery;
pub mod transmission;

use rand::rngs::SmallRng;

use crate::components::belief::BeliefProfile;
use crate::components::graph::PopulationGraph;
use crate::components::metrics::TickDelta;

pub use aggregation::{accumulate_metrics, clear_tick_delta};
pub use outbreak::{inject_outbreak, outbreak_target, OutbreakReport};
pub use recovery::{recover, recovery_chance, run_recovery};
pub use transmission::{run_transmission, transmission_chance, transmit};

/// Advance `graph` by one day: transmission over every edge, then recovery
/// of every infected agent. Returns the metric deltas for the day.
pub fn step(
    graph: &mut PopulationGraph,
    day: u32,
    belief: &BeliefProfile,
    rng: &mut SmallRng,
) -> TickDelta {
    let mut delta = TickDelta::default();
    transmit(graph, day, belief, rng, &mut delta);
    recover(graph, day, belief, rng, &mut delta);
    delta
}
