//! Recovery System
//!
//! Infected agents may become resistant, more likely the longer they have
//! held the belief.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::belief::{ActiveBelief, BeliefProfile};
use crate::components::graph::PopulationGraph;
use crate::components::metrics::TickDelta;
use crate::components::world::SimulationClock;
use crate::SimRng;

/// Constants for recovery
pub mod recovery_constants {
    /// Recovery happens when the drawn chance exceeds this
    pub const RECOVERY_THRESHOLD: f32 = 0.3;
    /// Days of infection over which the chance ramps up linearly
    pub const RECOVERY_RAMP_DAYS: f32 = 10.0;
    /// Cohesion gained per recovery
    pub const COHESION_PER_RECOVERY: f32 = 1.0;
}

use recovery_constants::*;

/// Recovery chance before comparing against the threshold.
///
/// `draw` is a uniform sample in [0, 1).
pub fn recovery_chance(belief: &BeliefProfile, critical_thinking: f32, days_infected: u32, draw: f32) -> f32 {
    (1.0 - belief.params.stickiness())
        * critical_thinking
        * (days_infected as f32 / RECOVERY_RAMP_DAYS)
        * draw
}

/// Check every infected agent for recovery, in id order.
///
/// Agents infected earlier in the same tick are included; with zero days
/// infected their chance is zero.
pub fn recover(
    graph: &mut PopulationGraph,
    day: u32,
    belief: &BeliefProfile,
    rng: &mut SmallRng,
    delta: &mut TickDelta,
) {
    for agent in graph.agents_mut() {
        if !agent.is_infected() {
            continue;
        }
        let days_infected = agent.days_infected(day);
        let chance = recovery_chance(
            belief,
            agent.attributes().critical_thinking,
            days_infected,
            rng.gen::<f32>(),
        );
        if chance > RECOVERY_THRESHOLD && agent.recover() {
            delta.recoveries += 1;
            delta.cohesion_change += COHESION_PER_RECOVERY;
        }
    }
}

/// System: Run the recovery phase for the current day
pub fn run_recovery(
    clock: Res<SimulationClock>,
    belief: Res<ActiveBelief>,
    mut graph: ResMut<PopulationGraph>,
    mut rng: ResMut<SimRng>,
    mut delta: ResMut<TickDelta>,
) {
    recover(&mut graph, clock.day, &belief.0, &mut rng.0, &mut delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::{AgentId, Attributes};
    use crate::components::belief::{BeliefId, BeliefParams};
    use contagion_events::AgentState;
    use rand::SeedableRng;

    fn belief(stickiness: f32) -> BeliefProfile {
        BeliefProfile::new(
            BeliefId::preset(1),
            "Rumor",
            "",
            BeliefParams::new(0.5, stickiness, 0.0, 0.0, 0.5),
            "#000000",
        )
    }

    fn thinker(critical_thinking: f32) -> Attributes {
        Attributes {
            critical_thinking,
            ..Attributes::default()
        }
    }

    #[test]
    fn test_recovery_chance_formula() {
        let b = belief(0.2);
        // 0.8 * 0.5 * 0.5 * 0.5
        assert!((recovery_chance(&b, 0.5, 5, 0.5) - 0.1).abs() < 1e-6);
        assert_eq!(recovery_chance(&b, 0.9, 0, 0.99), 0.0);
    }

    #[test]
    fn test_sticky_belief_never_recovers() {
        let mut graph = PopulationGraph::from_parts(vec![thinker(1.0); 10], []).unwrap();
        let b = belief(1.0);
        for i in 0..10 {
            graph.agent_mut(AgentId(i)).unwrap().infect(0, &b.id);
        }
        let mut rng = SmallRng::seed_from_u64(3);
        let mut delta = TickDelta::default();
        for day in 0..100 {
            recover(&mut graph, day, &b, &mut rng, &mut delta);
        }
        assert_eq!(delta.recoveries, 0);
        assert_eq!(graph.count_state(AgentState::Infected), 10);
    }

    #[test]
    fn test_long_infection_recovers() {
        let mut graph = PopulationGraph::from_parts(vec![thinker(1.0); 20], []).unwrap();
        let b = belief(0.0);
        for i in 0..20 {
            graph.agent_mut(AgentId(i)).unwrap().infect(0, &b.id);
        }
        let mut rng = SmallRng::seed_from_u64(3);
        let mut delta = TickDelta::default();
        // After 30 days the chance is 3 * draw, above threshold unless draw < 0.1.
        for day in 30..60 {
            recover(&mut graph, day, &b, &mut rng, &mut delta);
        }
        assert_eq!(graph.count_state(AgentState::Resistant), 20);
        assert_eq!(delta.recoveries, 20);
        assert_eq!(delta.cohesion_change, 20.0);
    }

    #[test]
    fn test_susceptible_agents_untouched() {
        let mut graph = PopulationGraph::from_parts(vec![thinker(1.0); 5], []).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut delta = TickDelta::default();
        recover(&mut graph, 50, &belief(0.0), &mut rng, &mut delta);
        assert_eq!(graph.count_state(AgentState::Susceptible), 5);
        assert_eq!(delta, TickDelta::default());
    }
}
