//! Statistics Aggregation
//!
//! Derives population counts and social metrics from graph state.

use serde::Serialize;

use contagion_events::Snapshot;

use crate::components::graph::PopulationGraph;
use crate::components::metrics::{clamp_metric, SocialMetrics};

/// Build the snapshot for `day` from committed graph state.
///
/// Pure read: counts are recomputed from scratch on every call, so calling
/// it twice without an intervening step or injection gives the same value.
pub fn aggregate_snapshot(graph: &PopulationGraph, metrics: &SocialMetrics, day: u32) -> Snapshot {
    let counts = graph.state_counts();
    Snapshot {
        day,
        susceptible: counts.susceptible,
        infected: counts.infected,
        resistant: counts.resistant,
        trust: metrics.trust,
        chaos: metrics.chaos,
        polarization: metrics.polarization,
        social_cohesion: metrics.social_cohesion,
        critical_thinking: clamp_metric(graph.mean_critical_thinking()),
    }
}

/// Overall statistics for a recorded run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub days_recorded: usize,
    pub population: usize,
    pub peak_infected: usize,
    pub peak_day: u32,
    pub final_susceptible: usize,
    pub final_infected: usize,
    pub final_resistant: usize,
    /// Agents that held the belief at any point
    pub ever_infected: usize,
    pub final_trust: f32,
    pub final_chaos: f32,
    pub final_polarization: f32,
    pub final_social_cohesion: f32,
}

/// Summarize a history, `None` if nothing was recorded.
pub fn summarize(history: &[Snapshot]) -> Option<SummaryStats> {
    let last = history.last()?;
    let peak = history
        .iter()
        .fold(&history[0], |best, s| if s.infected > best.infected { s } else { best });

    Some(SummaryStats {
        days_recorded: history.len(),
        population: last.population(),
        peak_infected: peak.infected,
        peak_day: peak.day,
        final_susceptible: last.susceptible,
        final_infected: last.infected,
        final_resistant: last.resistant,
        ever_infected: last.population() - last.susceptible,
        final_trust: last.trust,
        final_chaos: last.chaos,
        final_polarization: last.polarization,
        final_social_cohesion: last.social_cohesion,
    })
}
