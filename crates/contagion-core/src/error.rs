//! Crate-level error type.

use thiserror::Error;

use crate::beliefs::{CatalogError, GenerationError};
use crate::components::belief::BeliefError;
use crate::components::graph::GraphError;
use crate::config::ConfigError;
use crate::output::OutputError;

/// Errors surfaced by the simulation outside steady-state ticking
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Belief error: {0}")]
    Belief(#[from] BeliefError),
    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
