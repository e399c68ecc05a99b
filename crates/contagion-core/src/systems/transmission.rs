//! Transmission System
//!
//! Spreads the active belief along contact edges.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::components::agent::Attributes;
use crate::components::belief::{ActiveBelief, BeliefProfile};
use crate::components::graph::{Edge, PopulationGraph};
use crate::components::metrics::TickDelta;
use crate::components::world::SimulationClock;
use crate::SimRng;

/// Constants for per-edge transmission
pub mod transmission_constants {
    /// Chance is scaled by a uniform factor in [JITTER_MIN, JITTER_MAX)
    pub const JITTER_MIN: f32 = 0.7;
    pub const JITTER_MAX: f32 = 1.3;
    /// Sources above this social influence transmit harder
    pub const INFLUENCER_THRESHOLD: f32 = 0.7;
    pub const INFLUENCER_BOOST: f32 = 1.3;
    /// Targets above this media trust are swayed by media beliefs
    pub const MEDIA_TRUST_THRESHOLD: f32 = 0.8;
    pub const MEDIA_BOOST: f32 = 1.4;
    /// Per-infection metric deltas, scaled by the belief parameter named
    pub const CHAOS_PER_EMOTIONAL_IMPACT: f32 = 5.0;
    pub const POLARIZATION_PER_POLARIZATION: f32 = 3.0;
    pub const TRUST_DECAY_PER_POLARIZATION: f32 = 0.5;
    pub const COHESION_LOSS_PER_POLARIZATION: f32 = 2.0;
}

use transmission_constants::*;

/// Probability that `target` adopts the belief over `edge` this tick.
///
/// `jitter` is the uniform scaling factor drawn for this edge.
pub fn transmission_chance(
    belief: &BeliefProfile,
    edge: &Edge,
    source: &Attributes,
    target: &Attributes,
    jitter: f32,
) -> f32 {
    let params = &belief.params;
    let mut chance = params.virality()
        * edge.trust
        * (1.0 - target.skepticism * target.critical_thinking)
        * (target.emotional_susceptibility * params.emotional_impact());

    chance *= jitter;

    if source.social_influence > INFLUENCER_THRESHOLD {
        chance *= INFLUENCER_BOOST;
    }

    if target.trust_in_media > MEDIA_TRUST_THRESHOLD && belief.mentions_media() {
        chance *= MEDIA_BOOST;
    }

    chance
}

/// Single pass over all edges in insertion order.
///
/// Infections take effect immediately, so a target converted by an earlier
/// edge is no longer susceptible when a later edge reaches it, and a newly
/// infected agent is already a source for edges later in the list.
pub fn transmit(
    graph: &mut PopulationGraph,
    day: u32,
    belief: &BeliefProfile,
    rng: &mut SmallRng,
    delta: &mut TickDelta,
) {
    let polarization = belief.params.polarization();
    let emotional_impact = belief.params.emotional_impact();

    for index in 0..graph.edge_count() {
        let edge = graph.edges()[index];
        let (source, target) = match (graph.agent(edge.source), graph.agent(edge.target)) {
            (Some(source), Some(target)) => (source, target),
            _ => continue,
        };
        if !source.is_infected() || !target.is_susceptible() {
            continue;
        }

        let source_attrs = *source.attributes();
        let target_attrs = *target.attributes();
        let jitter = rng.gen_range(JITTER_MIN..JITTER_MAX);
        let chance = transmission_chance(belief, &edge, &source_attrs, &target_attrs, jitter);

        if chance > rng.gen::<f32>() {
            let infected = graph
                .agent_mut(edge.target)
                .map(|agent| agent.infect(day, &belief.id))
                .unwrap_or(false);
            if infected {
                delta.new_infections += 1;
                delta.chaos += emotional_impact * CHAOS_PER_EMOTIONAL_IMPACT;
                delta.polarization += polarization * POLARIZATION_PER_POLARIZATION;
                delta.trust_decay += polarization * TRUST_DECAY_PER_POLARIZATION;
                delta.cohesion_change -= polarization * COHESION_LOSS_PER_POLARIZATION;
            }
        }
    }
}

/// System: Run the transmission phase for the current day
pub fn run_transmission(
    clock: Res<SimulationClock>,
    belief: Res<ActiveBelief>,
    mut graph: ResMut<PopulationGraph>,
    mut rng: ResMut<SimRng>,
    mut delta: ResMut<TickDelta>,
) {
    transmit(&mut graph, clock.day, &belief.0, &mut rng.0, &mut delta);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::agent::AgentId;
    use crate::components::belief::{BeliefId, BeliefParams};
    use contagion_events::AgentState;
    use rand::SeedableRng;

    fn belief(name: &str, virality: f32, polarization: f32, emotional: f32) -> BeliefProfile {
        BeliefProfile::new(
            BeliefId::preset(1),
            name,
            "",
            BeliefParams::new(virality, 0.0, 0.0, polarization, emotional),
            "#000000",
        )
    }

    fn receptive() -> Attributes {
        Attributes {
            skepticism: 0.0,
            critical_thinking: 0.0,
            social_influence: 0.0,
            emotional_susceptibility: 1.0,
            trust_in_media: 0.0,
        }
    }

    fn edge(trust: f32) -> Edge {
        Edge {
            source: AgentId(0),
            target: AgentId(1),
            trust,
            strength: 0.5,
        }
    }

    #[test]
    fn test_base_chance() {
        let b = belief("Rumor", 0.5, 0.0, 0.8);
        let target = Attributes {
            skepticism: 0.5,
            critical_thinking: 0.5,
            emotional_susceptibility: 0.5,
            ..receptive()
        };
        // 0.5 * 0.6 * (1 - 0.25) * (0.5 * 0.8)
        let chance = transmission_chance(&b, &edge(0.6), &receptive(), &target, 1.0);
        assert!((chance - 0.09).abs() < 1e-6);
    }

    #[test]
    fn test_influencer_and_media_boosts() {
        let b = belief("Media Storm", 0.5, 0.0, 1.0);
        let influencer = Attributes {
            social_influence: 0.9,
            ..receptive()
        };
        let media_fan = Attributes {
            trust_in_media: 0.9,
            ..receptive()
        };
        let base = transmission_chance(&b, &edge(1.0), &receptive(), &receptive(), 1.0);
        let boosted = transmission_chance(&b, &edge(1.0), &influencer, &media_fan, 1.0);
        assert!((boosted - base * 1.3 * 1.4).abs() < 1e-6);

        let plain = belief("Storm", 0.5, 0.0, 1.0);
        let not_media = transmission_chance(&plain, &edge(1.0), &receptive(), &media_fan, 1.0);
        assert!((not_media - base).abs() < 1e-6);
    }

    #[test]
    fn test_zero_virality_never_transmits() {
        let mut graph = PopulationGraph::from_parts(
            vec![receptive(); 3],
            [(0, 1, 1.0, 1.0), (0, 2, 1.0, 1.0)],
        )
        .unwrap();
        let b = belief("Rumor", 0.0, 0.5, 1.0);
        graph.agent_mut(AgentId(0)).unwrap().infect(0, &b.id);

        let mut rng = SmallRng::seed_from_u64(5);
        let mut delta = TickDelta::default();
        for day in 0..20 {
            transmit(&mut graph, day, &b, &mut rng, &mut delta);
        }
        assert_eq!(delta.new_infections, 0);
        assert_eq!(graph.count_state(AgentState::Infected), 1);
    }

    #[test]
    fn test_infection_visible_within_same_pass() {
        // 0 -> 1 -> 2: agent 1 is converted by the first edge and immediately
        // spreads over the second edge in the same pass.
        let mut graph = PopulationGraph::from_parts(
            vec![receptive(); 3],
            [(0, 1, 1.0, 1.0), (1, 2, 1.0, 1.0)],
        )
        .unwrap();
        let b = belief("Rumor", 1.0, 0.0, 1.0);
        graph.agent_mut(AgentId(0)).unwrap().infect(0, &b.id);

        // With every factor at 1.0 the chance is the jitter itself, at least 0.7.
        // Retry seeds until the first pass converts both; the order semantics
        // are what is under test, not a specific seed.
        let converted = (0..64u64).any(|seed| {
            let mut g = graph.clone();
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut delta = TickDelta::default();
            transmit(&mut g, 1, &b, &mut rng, &mut delta);
            delta.new_infections == 2 && g.count_state(AgentState::Infected) == 3
        });
        assert!(converted);
    }

    #[test]
    fn test_first_successful_edge_wins() {
        // Two sources target agent 2; only one infection may be counted.
        let mut graph = PopulationGraph::from_parts(
            vec![receptive(); 3],
            [(0, 2, 1.0, 1.0), (1, 2, 1.0, 1.0)],
        )
        .unwrap();
        let b = belief("Rumor", 1.0, 1.0, 1.0);
        graph.agent_mut(AgentId(0)).unwrap().infect(0, &b.id);
        graph.agent_mut(AgentId(1)).unwrap().infect(0, &b.id);

        for seed in 0..32u64 {
            let mut g = graph.clone();
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut delta = TickDelta::default();
            transmit(&mut g, 1, &b, &mut rng, &mut delta);
            assert!(delta.new_infections <= 1);
            assert_eq!(g.count_state(AgentState::Infected), 2 + delta.new_infections as usize);
        }
    }

    #[test]
    fn test_infection_deltas() {
        let mut graph =
            PopulationGraph::from_parts(vec![receptive(); 2], [(0, 1, 1.0, 1.0)]).unwrap();
        let b = belief("Rumor", 1.0, 0.5, 1.0);
        graph.agent_mut(AgentId(0)).unwrap().infect(0, &b.id);

        // Chance is at least 0.7; find a seed where the edge fires.
        for seed in 0..64u64 {
            let mut g = graph.clone();
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut delta = TickDelta::default();
            transmit(&mut g, 3, &b, &mut rng, &mut delta);
            if delta.new_infections == 1 {
                assert_eq!(delta.chaos, 5.0);
                assert_eq!(delta.polarization, 1.5);
                assert_eq!(delta.trust_decay, 0.25);
                assert_eq!(delta.cohesion_change, -1.0);
                let target = g.agent(AgentId(1)).unwrap();
                assert_eq!(target.infection_day(), Some(3));
                assert!(target.beliefs_held().contains(&b.id));
                return;
            }
        }
        panic!("edge never fired");
    }
}
