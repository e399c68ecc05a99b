//! Metric Aggregation System
//!
//! Folds the tick's deltas into the running social metrics.

use bevy_ecs::prelude::*;

use crate::components::metrics::{SocialMetrics, TickDelta};

/// System: Clear the previous tick's deltas
pub fn clear_tick_delta(mut delta: ResMut<TickDelta>) {
    *delta = TickDelta::default();
}

/// System: Apply this tick's deltas to the accumulators
pub fn accumulate_metrics(delta: Res<TickDelta>, mut metrics: ResMut<SocialMetrics>) {
    metrics.apply(&delta);
}
