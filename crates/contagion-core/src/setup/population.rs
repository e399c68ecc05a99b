//! Population Generation
//!
//! Spawns agents with uniform random attributes and wires a sparse random
//! contact graph between them.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::{Agent, AgentId, Attributes};
use crate::components::graph::PopulationGraph;

/// Each agent attempts between MIN and MAX outgoing edges (inclusive).
pub const MIN_OUT_DEGREE: usize = 3;
pub const MAX_OUT_DEGREE: usize = 10;

/// Recommended population bounds
pub const MIN_RECOMMENDED_POPULATION: usize = 50;
pub const MAX_RECOMMENDED_POPULATION: usize = 500;

/// Generate uniform random attributes in [0, 1)
fn generate_attributes(rng: &mut SmallRng) -> Attributes {
    Attributes {
        skepticism: rng.gen(),
        critical_thinking: rng.gen(),
        social_influence: rng.gen(),
        emotional_susceptibility: rng.gen(),
        trust_in_media: rng.gen(),
    }
}

/// Build a fresh population graph of exactly `population_size` agents.
///
/// Every agent draws an intended out-degree, then makes that many single
/// attempts at a random target. Self-targets and repeat targets are skipped
/// without retry, so true degree varies and the graph may be disconnected.
pub fn generate_population(population_size: usize, rng: &mut SmallRng) -> PopulationGraph {
    let agents = (0..population_size)
        .map(|i| Agent::new(AgentId(i), generate_attributes(rng)))
        .collect();
    let mut graph = PopulationGraph::with_agents(agents);

    for i in 0..population_size {
        let source = AgentId(i);
        let attempts = rng.gen_range(MIN_OUT_DEGREE..=MAX_OUT_DEGREE);
        for _ in 0..attempts {
            let target = AgentId(rng.gen_range(0..population_size));
            if target == source || graph.agents()[i].has_neighbor(target) {
                continue;
            }
            let trust: f32 = rng.gen();
            let strength: f32 = rng.gen();
            graph.connect(source, target, trust, strength);
        }
    }

    tracing::debug!(
        agents = graph.len(),
        edges = graph.edge_count(),
        "generated population graph"
    );
    graph
}
