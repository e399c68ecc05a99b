//! Paced Clock
//!
//! Drives ticks at a fixed interval. A tick that comes due while the
//! previous one is still running is skipped, never overlapped.

use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::sim::Simulation;

/// Tick `sim` up to `days` times, one per `period`.
///
/// Stops early when the simulation is paused. A zero period runs the days
/// back to back. Returns the number of days run.
pub async fn run_paced(sim: &mut Simulation, days: u32, period: Duration) -> u32 {
    if period.is_zero() {
        return sim.run_days(days);
    }

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut ran = 0;
    while ran < days {
        ticker.tick().await;
        if sim.tick().is_none() {
            break;
        }
        ran += 1;
    }
    tracing::debug!(days = ran, "paced run finished");
    ran
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::setup::default_belief;

    fn sim() -> Simulation {
        Simulation::new(
            SimulationConfig {
                population_size: 50,
                seed: Some(11),
                ..SimulationConfig::default()
            },
            default_belief(),
        )
    }

    #[tokio::test]
    async fn test_paced_run_counts_days() {
        let mut sim = sim();
        sim.play();
        let ran = run_paced(&mut sim, 5, Duration::from_millis(1)).await;
        assert_eq!(ran, 5);
        assert_eq!(sim.history().len(), 5);
    }

    #[tokio::test]
    async fn test_paused_simulation_runs_nothing() {
        let mut sim = sim();
        let ran = run_paced(&mut sim, 5, Duration::from_millis(1)).await;
        assert_eq!(ran, 0);
        assert!(sim.history().is_empty());
    }

    #[tokio::test]
    async fn test_zero_period_runs_immediately() {
        let mut sim = sim();
        sim.play();
        assert_eq!(run_paced(&mut sim, 7, Duration::ZERO).await, 7);
    }
}
