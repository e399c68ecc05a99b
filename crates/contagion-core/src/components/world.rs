//! World State Components

use bevy_ecs::prelude::*;

/// Resource: the simulation clock
#[derive(Resource, Debug, Clone, Default)]
pub struct SimulationClock {
    /// Day the next tick simulates
    pub day: u32,
    /// Whether the driving clock is running
    pub playing: bool,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_day(&mut self) {
        self.day += 1;
    }
}
