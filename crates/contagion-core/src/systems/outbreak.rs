//! Outbreak Injection
//!
//! Seeds or boosts infections independently of edge transmission.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::AgentId;
use crate::components::belief::BeliefProfile;
use crate::components::graph::PopulationGraph;

/// Constants for outbreak sizing
pub mod outbreak_constants {
    /// An initial outbreak infects 1 in this many agents (2%), at least one
    pub const INITIAL_OUTBREAK_DIVISOR: usize = 50;
    /// A boost adds a uniform fraction in [BOOST_MIN, BOOST_MAX) of the current infected
    pub const BOOST_MIN: f64 = 0.3;
    pub const BOOST_MAX: f64 = 0.7;
    /// Random picks allowed per agent in the population
    pub const ATTEMPTS_PER_AGENT: usize = 2;
}

use outbreak_constants::*;

/// Result of one injection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutbreakReport {
    /// Infections the injector aimed for
    pub target: usize,
    /// Infections actually achieved
    pub infected: usize,
    /// Random picks spent
    pub attempts: usize,
}

impl OutbreakReport {
    /// Fewer infections than targeted; an accepted outcome when the
    /// susceptible pool or the attempt budget runs out.
    pub fn undershoot(&self) -> bool {
        self.infected < self.target
    }
}

/// How many new infections to aim for.
pub fn outbreak_target(current_infected: usize, population_size: usize, rng: &mut SmallRng) -> usize {
    if current_infected == 0 {
        // floor(0.02 * n) in integer arithmetic
        (population_size / INITIAL_OUTBREAK_DIVISOR).max(1)
    } else {
        let factor = rng.gen_range(BOOST_MIN..BOOST_MAX);
        (current_infected as f64 * factor).floor() as usize
    }
}

/// Infect randomly picked susceptible agents until the target is met or
/// `2 * population` picks have been spent.
pub fn inject_outbreak(
    graph: &mut PopulationGraph,
    day: u32,
    belief: &BeliefProfile,
    current_infected: usize,
    rng: &mut SmallRng,
) -> OutbreakReport {
    let population_size = graph.len();
    let target = outbreak_target(current_infected, population_size, rng);
    let max_attempts = population_size * ATTEMPTS_PER_AGENT;

    let mut infected = 0;
    let mut attempts = 0;
    while infected < target && attempts < max_attempts {
        let pick = AgentId(rng.gen_range(0..population_size));
        if let Some(agent) = graph.agent_mut(pick) {
            if agent.infect(day, &belief.id) {
                infected += 1;
            }
        }
        attempts += 1;
    }

    let report = OutbreakReport {
        target,
        infected,
        attempts,
    };
    if report.undershoot() {
        tracing::warn!(
            goal = report.target,
            infected = report.infected,
            attempts = report.attempts,
            "outbreak fell short of target"
        );
    }
    report
}
