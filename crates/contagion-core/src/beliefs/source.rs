//! Parameter Sources
//!
//! Custom beliefs get their parameters from an external generator given a
//! name and description. The generator is a black box; this module defines
//! the contract and a couple of offline implementations.

use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

use crate::components::belief::ParameterMap;

/// Errors from a parameter generator
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse generator response: {0}")]
    Parse(String),
    #[error("generator failed: {0}")]
    Upstream(String),
}

/// Produces raw propagation parameters for a named belief
pub trait ParameterSource {
    fn generate(&self, name: &str, description: &str) -> Result<ParameterMap, GenerationError>;
}

/// Parse a generator response into a parameter map.
///
/// Accepts a JSON object, optionally wrapped in a markdown code fence.
/// Only numeric fields are kept; checking for the required keys is left
/// to belief construction so a missing key is reported by name.
pub fn parse_parameter_json(content: &str) -> Result<ParameterMap, GenerationError> {
    let body = strip_code_fence(content.trim());
    let value: Value =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| GenerationError::Parse("expected a JSON object".to_string()))?;

    Ok(object
        .iter()
        .filter_map(|(key, v)| v.as_f64().map(|n| (key.clone(), n)))
        .collect())
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop an optional language tag on the opening line
    let rest = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Returns the same parameters for every request
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub params: ParameterMap,
}

impl StaticSource {
    pub fn new(params: ParameterMap) -> Self {
        Self { params }
    }
}

impl ParameterSource for StaticSource {
    fn generate(&self, _name: &str, _description: &str) -> Result<ParameterMap, GenerationError> {
        Ok(self.params.clone())
    }
}

/// Reads a saved generator response from disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ParameterSource for JsonFileSource {
    fn generate(&self, name: &str, _description: &str) -> Result<ParameterMap, GenerationError> {
        tracing::debug!(path = %self.path.display(), belief = name, "reading belief parameters");
        let content = std::fs::read_to_string(&self.path)?;
        parse_parameter_json(&content)
    }
}
