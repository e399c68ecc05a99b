//! Simulation Setup
//!
//! Population graph generation and the preset belief table.

pub mod population;
pub mod presets;

pub use population::*;
pub use presets::*;
