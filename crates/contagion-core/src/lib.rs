//! Belief Contagion Simulation Engine Library
//!
//! Models an idea spreading through a random contact graph: transmission
//! along trusted edges, recovery into resistance, and the social metrics
//! (trust, chaos, polarization, cohesion) the spread leaves behind.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod beliefs;
pub mod clock;
pub mod components;
pub mod config;
pub mod error;
pub mod output;
pub mod setup;
pub mod sim;
pub mod systems;

pub use components::*;
pub use config::{Config, ConfigError, OutputConfig, SimulationConfig};
pub use error::SimError;
pub use sim::Simulation;

pub use contagion_events::{AgentState, GraphSnapshot, Snapshot};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
