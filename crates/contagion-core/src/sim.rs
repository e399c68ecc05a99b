//! Simulation Driver
//!
//! Owns the ECS world and the per-tick schedule. All graph mutation goes
//! through `&mut self`, so a tick is never observed half-done and ticks
//! never overlap.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use contagion_events::{AgentState, GraphSnapshot, Snapshot};

use crate::components::belief::{ActiveBelief, BeliefProfile};
use crate::components::graph::PopulationGraph;
use crate::components::metrics::{SocialMetrics, TickDelta};
use crate::components::world::SimulationClock;
use crate::config::SimulationConfig;
use crate::output::{aggregate_snapshot, record_snapshot, TimeSeriesRecorder};
use crate::setup::generate_population;
use crate::systems::{
    accumulate_metrics, clear_tick_delta, inject_outbreak, run_recovery, run_transmission,
    OutbreakReport,
};
use crate::SimRng;

pub struct Simulation {
    world: World,
    schedule: Schedule,
    config: SimulationConfig,
}

impl Simulation {
    /// Build a simulation with a freshly generated population.
    pub fn new(config: SimulationConfig, belief: BeliefProfile) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let graph = generate_population(config.population_size, &mut rng);
        Self::assemble(config, belief, graph, rng)
    }

    /// Build a simulation around an explicit graph. `config.population_size`
    /// is overwritten with the graph's size.
    pub fn from_graph(mut config: SimulationConfig, belief: BeliefProfile, graph: PopulationGraph) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        config.population_size = graph.len();
        Self::assemble(config, belief, graph, rng)
    }

    fn assemble(
        config: SimulationConfig,
        belief: BeliefProfile,
        graph: PopulationGraph,
        rng: SmallRng,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(SimRng(rng));
        world.insert_resource(ActiveBelief(belief));
        world.insert_resource(TickDelta::default());

        let mut sim = Self {
            world,
            schedule: build_schedule(),
            config,
        };
        sim.install_generation(graph);
        sim
    }

    /// Replace the graph and everything derived from it in one go.
    fn install_generation(&mut self, graph: PopulationGraph) {
        tracing::info!(
            agents = graph.len(),
            edges = graph.edge_count(),
            "installed new population"
        );
        self.world.insert_resource(graph);
        self.world.insert_resource(SocialMetrics::default());
        self.world.insert_resource(TimeSeriesRecorder::new());
        self.world.insert_resource(SimulationClock::new());
        self.world.insert_resource(TickDelta::default());
    }

    /// Stop the clock, discard the graph and history, and build a fresh
    /// population of the configured size. Draws continue from the run's RNG.
    pub fn reset(&mut self) {
        let size = self.config.population_size;
        let graph = generate_population(size, &mut self.world.resource_mut::<SimRng>().0);
        self.install_generation(graph);
    }

    pub fn reset_with_size(&mut self, population_size: usize) {
        self.config.population_size = population_size;
        self.reset();
    }

    /// Start the clock. Seeds an outbreak first if nobody is infected.
    pub fn play(&mut self) -> Option<OutbreakReport> {
        let report = if self.infected_count() == 0 {
            Some(self.inject_outbreak())
        } else {
            None
        };
        self.world.resource_mut::<SimulationClock>().playing = true;
        report
    }

    pub fn pause(&mut self) {
        self.world.resource_mut::<SimulationClock>().playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.world.resource::<SimulationClock>().playing
    }

    /// Seed or boost infections, starting the clock if it was idle.
    pub fn inject_outbreak(&mut self) -> OutbreakReport {
        let report = self.world.resource_scope(|world, mut rng: Mut<SimRng>| {
            let day = world.resource::<SimulationClock>().day;
            let belief = world.resource::<ActiveBelief>().0.clone();
            let mut graph = world.resource_mut::<PopulationGraph>();
            let current = graph.count_state(AgentState::Infected);
            inject_outbreak(&mut graph, day, &belief, current, &mut rng.0)
        });
        tracing::info!(
            day = self.current_day(),
            goal = report.target,
            infected = report.infected,
            "outbreak injected"
        );

        let mut clock = self.world.resource_mut::<SimulationClock>();
        if !clock.playing {
            clock.playing = true;
        }
        report
    }

    /// Run one day if the clock is playing and return its snapshot.
    pub fn tick(&mut self) -> Option<Snapshot> {
        if !self.is_playing() {
            return None;
        }
        if self.config.auto_outbreak && self.infected_count() == 0 {
            self.inject_outbreak();
        }

        self.schedule.run(&mut self.world);

        let snapshot = self.world.resource::<TimeSeriesRecorder>().latest().cloned();
        self.world.resource_mut::<SimulationClock>().advance_day();
        snapshot
    }

    /// Tick up to `days` times, stopping early if paused. Returns days run.
    pub fn run_days(&mut self, days: u32) -> u32 {
        let mut ran = 0;
        while ran < days && self.tick().is_some() {
            ran += 1;
        }
        ran
    }

    pub fn select_belief(&mut self, belief: BeliefProfile) {
        tracing::info!(id = %belief.id, name = %belief.name, "selected belief");
        self.world.insert_resource(ActiveBelief(belief));
    }

    pub fn belief(&self) -> &BeliefProfile {
        &self.world.resource::<ActiveBelief>().0
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Day the next tick will simulate
    pub fn current_day(&self) -> u32 {
        self.world.resource::<SimulationClock>().day
    }

    pub fn graph(&self) -> &PopulationGraph {
        self.world.resource::<PopulationGraph>()
    }

    pub fn graph_snapshot(&self) -> GraphSnapshot {
        self.graph().to_snapshot(self.current_day())
    }

    pub fn metrics(&self) -> SocialMetrics {
        *self.world.resource::<SocialMetrics>()
    }

    /// Deltas produced by the most recent tick
    pub fn last_delta(&self) -> TickDelta {
        *self.world.resource::<TickDelta>()
    }

    /// Current state as a snapshot, without recording it
    pub fn snapshot(&self) -> Snapshot {
        aggregate_snapshot(self.graph(), self.world.resource::<SocialMetrics>(), self.current_day())
    }

    pub fn history(&self) -> &[Snapshot] {
        self.world.resource::<TimeSeriesRecorder>().snapshots()
    }

    pub fn recorder(&self) -> &TimeSeriesRecorder {
        self.world.resource::<TimeSeriesRecorder>()
    }

    fn infected_count(&self) -> usize {
        self.graph().count_state(AgentState::Infected)
    }
}

fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    // Transmission must finish before recovery; both commit before the
    // metrics fold and the snapshot read.
    schedule.add_systems(
        (
            clear_tick_delta,
            run_transmission,
            run_recovery,
            accumulate_metrics,
            record_snapshot,
        )
            .chain(),
    );
    schedule
}
