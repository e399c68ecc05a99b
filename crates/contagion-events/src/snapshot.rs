//! Snapshot Types
//!
//! Serialization structs for daily population snapshots and graph inspection.
//!
//! A `Snapshot` is recorded once per simulated day and never rewritten.
//! A `GraphSnapshot` is a read-only copy of the contact graph for network views.

use serde::{Deserialize, Serialize};

use crate::AgentState;

/// Population counts and social metrics for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub day: u32,
    pub susceptible: usize,
    pub infected: usize,
    pub resistant: usize,
    /// Institutional trust, 0-100
    pub trust: f32,
    /// Social chaos, 0-100
    pub chaos: f32,
    /// Polarization, 0-100
    pub polarization: f32,
    /// Social cohesion, 0-100
    pub social_cohesion: f32,
    /// Population mean critical thinking, 0-100
    pub critical_thinking: f32,
}

impl Snapshot {
    /// Chart label for this day, e.g. `Day: 12`.
    pub fn day_label(&self) -> String {
        format!("Day: {}", self.day)
    }

    pub fn population(&self) -> usize {
        self.susceptible + self.infected + self.resistant
    }

    /// Fraction of the population currently infected, 0.0 for an empty population.
    pub fn infected_fraction(&self) -> f32 {
        let population = self.population();
        if population == 0 {
            0.0
        } else {
            self.infected as f32 / population as f32
        }
    }
}

/// Agent view for network inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: usize,
    pub state: AgentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infection_day: Option<u32>,
    pub skepticism: f32,
    pub critical_thinking: f32,
    pub social_influence: f32,
    pub emotional_susceptibility: f32,
    pub trust_in_media: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub beliefs: Vec<String>,
    #[serde(default)]
    pub neighbors: Vec<usize>,
}

/// Directed contact edge view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeView {
    pub source: usize,
    pub target: usize,
    pub trust: f32,
    pub strength: f32,
}

/// Read-only copy of the whole contact graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub day: u32,
    pub agents: Vec<AgentView>,
    pub edges: Vec<EdgeView>,
}

impl GraphSnapshot {
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Belief listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeliefSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub virality: f32,
    pub stickiness: f32,
    pub resistance: f32,
    pub polarization: f32,
    pub emotional_impact: f32,
    pub color: String,
    #[serde(default)]
    pub is_custom: bool,
}
