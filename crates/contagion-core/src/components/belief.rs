//! Belief Components
//!
//! The propagating idea and its five propagation parameters.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use contagion_events::BeliefSummary;

/// Parameter keys an external generator must return.
pub const PARAMETER_KEYS: [&str; 5] = [
    "virality",
    "stickiness",
    "resistance",
    "polarization",
    "emotionalImpact",
];

/// Half-width of the jitter applied to generated parameters
pub const GENERATED_JITTER: f64 = 0.1;

/// Raw parameter mapping as returned by a parameter generator
pub type ParameterMap = BTreeMap<String, f64>;

/// Unique identifier for a belief
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BeliefId(pub String);

impl BeliefId {
    pub fn preset(index: usize) -> Self {
        Self(format!("preset_{:02}", index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BeliefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors building a belief from generated parameters
#[derive(Debug, Error, PartialEq)]
pub enum BeliefError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("generator response is missing parameter '{0}'")]
    MissingParameter(&'static str),
    #[error("parameter '{key}' is not a finite number: {value}")]
    InvalidParameter { key: &'static str, value: f64 },
}

/// Propagation parameters, each clamped to [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeliefParams {
    virality: f32,
    stickiness: f32,
    resistance: f32,
    polarization: f32,
    emotional_impact: f32,
}

impl BeliefParams {
    pub fn new(
        virality: f32,
        stickiness: f32,
        resistance: f32,
        polarization: f32,
        emotional_impact: f32,
    ) -> Self {
        Self {
            virality: clamp_unit(virality),
            stickiness: clamp_unit(stickiness),
            resistance: clamp_unit(resistance),
            polarization: clamp_unit(polarization),
            emotional_impact: clamp_unit(emotional_impact),
        }
    }

    /// How quickly the belief spreads
    pub fn virality(&self) -> f32 {
        self.virality
    }

    /// How long holders keep the belief
    pub fn stickiness(&self) -> f32 {
        self.stickiness
    }

    /// How hard the belief is to debunk. Carried, not consumed by the spread model.
    pub fn resistance(&self) -> f32 {
        self.resistance
    }

    /// How much the belief divides people
    pub fn polarization(&self) -> f32 {
        self.polarization
    }

    /// Emotional intensity of the belief
    pub fn emotional_impact(&self) -> f32 {
        self.emotional_impact
    }

    /// Validate and clamp a generated mapping, then jitter each value by
    /// up to `GENERATED_JITTER` in either direction.
    pub fn from_generated(params: &ParameterMap, rng: &mut SmallRng) -> Result<Self, BeliefError> {
        let mut values = [0.0f32; 5];
        for (slot, key) in values.iter_mut().zip(PARAMETER_KEYS) {
            let raw = *params.get(key).ok_or(BeliefError::MissingParameter(key))?;
            if !raw.is_finite() {
                return Err(BeliefError::InvalidParameter { key, value: raw });
            }
            *slot = raw.clamp(0.0, 1.0) as f32;
        }
        for slot in values.iter_mut() {
            let jitter = (rng.gen::<f64>() - 0.5) * 2.0 * GENERATED_JITTER;
            *slot = clamp_unit(*slot + jitter as f32);
        }
        let [virality, stickiness, resistance, polarization, emotional_impact] = values;
        Ok(Self::new(virality, stickiness, resistance, polarization, emotional_impact))
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Immutable description of the belief being simulated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefProfile {
    pub id: BeliefId,
    pub name: String,
    pub description: String,
    pub params: BeliefParams,
    /// Display color as `#rrggbb`
    pub color: String,
    pub is_custom: bool,
}

impl BeliefProfile {
    pub fn new(
        id: BeliefId,
        name: impl Into<String>,
        description: impl Into<String>,
        params: BeliefParams,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            params,
            color: color.into(),
            is_custom: false,
        }
    }

    /// Build a custom belief from an external generator's output.
    ///
    /// Id, color and jitter draws all come from `rng`.
    pub fn from_generated(
        name: &str,
        description: &str,
        params: &ParameterMap,
        rng: &mut SmallRng,
    ) -> Result<Self, BeliefError> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return Err(BeliefError::MissingField("name"));
        }
        if description.is_empty() {
            return Err(BeliefError::MissingField("description"));
        }

        let params = BeliefParams::from_generated(params, rng)?;
        let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        let color = format!("#{:06x}", rng.gen_range(0..=0xFF_FFFFu32));

        Ok(Self {
            id: BeliefId(format!("custom_{}", id)),
            name: name.to_string(),
            description: description.to_string(),
            params,
            color,
            is_custom: true,
        })
    }

    /// Media-trusting agents are more receptive to beliefs named after media.
    pub fn mentions_media(&self) -> bool {
        self.name.contains("Media")
    }

    pub fn summary(&self) -> BeliefSummary {
        BeliefSummary {
            id: self.id.0.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            virality: self.params.virality(),
            stickiness: self.params.stickiness(),
            resistance: self.params.resistance(),
            polarization: self.params.polarization(),
            emotional_impact: self.params.emotional_impact(),
            color: self.color.clone(),
            is_custom: self.is_custom,
        }
    }
}

/// Resource: the belief driving the current run
#[derive(Resource, Debug, Clone)]
pub struct ActiveBelief(pub BeliefProfile);
