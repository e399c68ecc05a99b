//! Social Metrics
//!
//! Population-level accumulators the spread leaves behind.

use bevy_ecs::prelude::*;
use serde::Serialize;

/// Starting values on reset
pub mod metric_constants {
    pub const INITIAL_TRUST: f32 = 75.0;
    pub const INITIAL_CHAOS: f32 = 0.0;
    pub const INITIAL_POLARIZATION: f32 = 0.0;
    pub const INITIAL_SOCIAL_COHESION: f32 = 80.0;
    /// Every accumulator is clamped to [0, METRIC_MAX]
    pub const METRIC_MAX: f32 = 100.0;
}

use metric_constants::*;

/// Resource: running social metric accumulators
///
/// Critical thinking is not tracked here; it is recomputed from the
/// population on every read.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SocialMetrics {
    pub trust: f32,
    pub chaos: f32,
    pub polarization: f32,
    pub social_cohesion: f32,
}

impl Default for SocialMetrics {
    fn default() -> Self {
        Self {
            trust: INITIAL_TRUST,
            chaos: INITIAL_CHAOS,
            polarization: INITIAL_POLARIZATION,
            social_cohesion: INITIAL_SOCIAL_COHESION,
        }
    }
}

impl SocialMetrics {
    /// Fold one tick's deltas into the accumulators, clamping each to [0, 100].
    pub fn apply(&mut self, delta: &TickDelta) {
        self.trust = clamp_metric(self.trust - delta.trust_decay);
        self.chaos = clamp_metric(self.chaos + delta.chaos);
        self.polarization = clamp_metric(self.polarization + delta.polarization);
        self.social_cohesion = clamp_metric(self.social_cohesion + delta.cohesion_change);
    }
}

pub(crate) fn clamp_metric(value: f32) -> f32 {
    value.clamp(0.0, METRIC_MAX)
}

/// Resource: metric changes produced by the current tick
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TickDelta {
    pub new_infections: u32,
    pub recoveries: u32,
    pub chaos: f32,
    pub polarization: f32,
    pub trust_decay: f32,
    pub cohesion_change: f32,
}
