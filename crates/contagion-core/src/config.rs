//! Configuration System
//!
//! Loads run parameters from simulation.toml so they can be adjusted without recompiling.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::setup::{MAX_RECOMMENDED_POPULATION, MIN_RECOMMENDED_POPULATION};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "simulation.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents in the population graph
    pub population_size: usize,
    /// Milliseconds between ticks when paced; does not affect the math
    pub tick_interval_ms: u64,
    /// Seed for every random draw; `None` seeds from system entropy
    pub seed: Option<u64>,
    /// Days to run
    pub days: u32,
    /// Name of the preset belief to simulate
    pub belief: String,
    /// Seed a fresh outbreak whenever a tick starts with nobody infected
    pub auto_outbreak: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            tick_interval_ms: 300,
            seed: None,
            days: 100,
            belief: "Social Media Misinformation".to_string(),
            auto_outbreak: true,
        }
    }
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub history_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("output/history.json"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()
    }
}

impl SimulationConfig {
    /// Reject unusable values; warn on sizes outside the recommended range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::Invalid(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(MIN_RECOMMENDED_POPULATION..=MAX_RECOMMENDED_POPULATION).contains(&self.population_size) {
            tracing::warn!(
                population_size = self.population_size,
                "population size outside recommended range {}-{}",
                MIN_RECOMMENDED_POPULATION,
                MAX_RECOMMENDED_POPULATION
            );
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
