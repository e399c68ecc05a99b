//! Invariant tests
//!
//! Properties that hold on every tick of every run.

use contagion_core::setup::{default_belief, preset_beliefs};
use contagion_core::{
    AgentState, BeliefId, BeliefParams, BeliefProfile, Simulation, SimulationConfig,
};

fn config(seed: u64, population_size: usize) -> SimulationConfig {
    SimulationConfig {
        population_size,
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

fn inert_belief(virality: f32, emotional_impact: f32) -> BeliefProfile {
    BeliefProfile::new(
        BeliefId("inert".to_string()),
        "Inert Rumor",
        "Goes nowhere",
        BeliefParams::new(virality, 0.5, 0.5, 0.5, emotional_impact),
        "#888888",
    )
}

#[test]
fn test_population_conserved_every_tick() {
    for belief in preset_beliefs() {
        let mut sim = Simulation::new(config(11, 120), belief);
        sim.play();
        for _ in 0..80 {
            let snapshot = sim.tick().unwrap();
            assert_eq!(
                snapshot.susceptible + snapshot.infected + snapshot.resistant,
                120
            );
        }
    }
}

#[test]
fn test_transitions_are_monotone() {
    let mut sim = Simulation::new(config(21, 150), default_belief());
    sim.play();
    let mut previous: Vec<AgentState> = sim.graph().agents().iter().map(|a| a.state()).collect();

    for _ in 0..100 {
        sim.tick();
        for (agent, before) in sim.graph().agents().iter().zip(&previous) {
            let after = agent.state();
            assert!(
                after == *before || before.can_become(after),
                "{} moved {} -> {}",
                agent.id(),
                before,
                after
            );
        }
        previous = sim.graph().agents().iter().map(|a| a.state()).collect();
    }
}

#[test]
fn test_resistant_count_never_decreases() {
    let mut sim = Simulation::new(config(31, 200), default_belief());
    sim.play();
    sim.run_days(100);
    for pair in sim.history().windows(2) {
        assert!(pair[1].resistant >= pair[0].resistant);
    }
}

#[test]
fn test_metrics_stay_in_range() {
    for belief in preset_beliefs() {
        let mut sim = Simulation::new(config(41, 300), belief);
        sim.play();
        sim.run_days(120);
        for s in sim.history() {
            for value in [s.trust, s.chaos, s.polarization, s.social_cohesion, s.critical_thinking] {
                assert!((0.0..=100.0).contains(&value), "metric {} out of range", value);
            }
        }
    }
}

#[test]
fn test_attributes_and_edges_in_unit_range() {
    let sim = Simulation::new(config(51, 250), default_belief());
    for agent in sim.graph().agents() {
        assert!(agent.attributes().is_valid());
    }
    for edge in sim.graph().edges() {
        assert!((0.0..=1.0).contains(&edge.trust));
        assert!((0.0..=1.0).contains(&edge.strength));
        assert_ne!(edge.source, edge.target);
    }
}

#[test]
fn test_infected_agents_hold_belief() {
    let belief = default_belief();
    let id = belief.id.clone();
    let mut sim = Simulation::new(config(61, 100), belief);
    sim.play();
    sim.run_days(20);
    for agent in sim.graph().agents() {
        if agent.state() != AgentState::Susceptible {
            assert!(agent.beliefs_held().contains(&id));
            assert!(agent.infection_day().is_some());
        }
    }
}

fn without_auto_outbreak(seed: u64) -> SimulationConfig {
    SimulationConfig {
        auto_outbreak: false,
        ..config(seed, 100)
    }
}

#[test]
fn test_zero_virality_spreads_nothing() {
    let mut sim = Simulation::new(without_auto_outbreak(71), inert_belief(0.0, 0.9));
    sim.play();
    let seeded = sim.snapshot().infected;
    assert_eq!(seeded, 2);
    for _ in 0..30 {
        let snapshot = sim.tick().unwrap();
        assert_eq!(snapshot.infected + snapshot.resistant, seeded);
        assert_eq!(sim.last_delta().new_infections, 0);
    }
}

#[test]
fn test_zero_emotional_impact_spreads_nothing() {
    let mut sim = Simulation::new(without_auto_outbreak(72), inert_belief(0.9, 0.0));
    sim.play();
    let seeded = sim.snapshot().infected;
    sim.run_days(30);
    for s in sim.history() {
        assert_eq!(s.infected + s.resistant, seeded);
        assert_eq!(s.chaos, 0.0);
    }
}

#[test]
fn test_critical_thinking_tracks_population() {
    let sim = Simulation::new(config(81, 200), default_belief());
    let mean: f32 = sim
        .graph()
        .agents()
        .iter()
        .map(|a| a.attributes().critical_thinking)
        .sum::<f32>()
        / 200.0;
    assert!((sim.snapshot().critical_thinking - mean * 100.0).abs() < 1e-3);
}

#[test]
fn test_snapshot_after_reset() {
    let mut sim = Simulation::new(config(91, 100), default_belief());
    sim.play();
    sim.run_days(25);
    sim.reset();

    let s = sim.snapshot();
    assert_eq!(s.day, 0);
    assert_eq!((s.susceptible, s.infected, s.resistant), (100, 0, 0));
    assert_eq!((s.trust, s.chaos, s.polarization, s.social_cohesion), (75.0, 0.0, 0.0, 80.0));
    assert_eq!(s.day_label(), "Day: 0");
}

#[test]
fn test_reading_state_does_not_mutate() {
    let mut sim = Simulation::new(config(101, 100), default_belief());
    sim.play();
    sim.run_days(5);
    let before = sim.graph_snapshot();
    let _ = sim.snapshot();
    let _ = sim.history();
    let _ = sim.metrics();
    assert_eq!(sim.graph_snapshot(), before);
    assert_eq!(sim.current_day(), 5);
}
