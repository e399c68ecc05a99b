//! Population Graph
//!
//! The fixed set of agents and their directed contact edges. Agents and
//! edges are never added or removed after construction; only agent state
//! and held beliefs change.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use contagion_events::{AgentState, AgentView, EdgeView, GraphSnapshot};

use super::agent::{Agent, AgentId, Attributes};

/// Directed contact channel between two agents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: AgentId,
    pub target: AgentId,
    /// How much the target trusts what arrives over this edge
    pub trust: f32,
    /// Tie strength. Carried for inspection, not used by transmission.
    pub strength: f32,
}

/// Errors assembling a graph from explicit parts
#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("edge {from} -> {to} references an agent outside the population of {population}")]
    UnknownAgent {
        from: usize,
        to: usize,
        population: usize,
    },
    #[error("self-loop on agent {0}")]
    SelfLoop(usize),
    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: usize, to: usize },
    #[error("attributes of agent {0} are outside [0, 1]")]
    AttributeOutOfRange(usize),
    #[error("edge {from} -> {to} has trust or strength outside [0, 1]")]
    EdgeWeightOutOfRange { from: usize, to: usize },
}

/// Counts of agents per adoption state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub susceptible: usize,
    pub infected: usize,
    pub resistant: usize,
}

impl StateCounts {
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.resistant
    }
}

/// Resource: the contact graph for the current generation
#[derive(Resource, Debug, Clone, Default)]
pub struct PopulationGraph {
    agents: Vec<Agent>,
    edges: Vec<Edge>,
}

impl PopulationGraph {
    /// Assemble a graph from explicit agents and `(source, target, trust, strength)` edges.
    ///
    /// Edge order is kept as given; it is the order transmission visits them.
    pub fn from_parts(
        attributes: Vec<Attributes>,
        edges: impl IntoIterator<Item = (usize, usize, f32, f32)>,
    ) -> Result<Self, GraphError> {
        let mut agents = Vec::with_capacity(attributes.len());
        for (i, attrs) in attributes.into_iter().enumerate() {
            if !attrs.is_valid() {
                return Err(GraphError::AttributeOutOfRange(i));
            }
            agents.push(Agent::new(AgentId(i), attrs));
        }

        let mut graph = Self {
            agents,
            edges: Vec::new(),
        };
        let population = graph.len();

        for (source, target, trust, strength) in edges {
            if source >= population || target >= population {
                return Err(GraphError::UnknownAgent {
                    from: source,
                    to: target,
                    population,
                });
            }
            if source == target {
                return Err(GraphError::SelfLoop(source));
            }
            if graph.agents[source].has_neighbor(AgentId(target)) {
                return Err(GraphError::DuplicateEdge {
                    from: source,
                    to: target,
                });
            }
            if !(0.0..=1.0).contains(&trust) || !(0.0..=1.0).contains(&strength) {
                return Err(GraphError::EdgeWeightOutOfRange {
                    from: source,
                    to: target,
                });
            }
            graph.connect(AgentId(source), AgentId(target), trust, strength);
        }

        Ok(graph)
    }

    pub(crate) fn with_agents(agents: Vec<Agent>) -> Self {
        Self {
            agents,
            edges: Vec::new(),
        }
    }

    /// Record an edge and the matching neighbor entry. Callers check for
    /// self-loops and duplicates.
    pub(crate) fn connect(&mut self, source: AgentId, target: AgentId, trust: f32, strength: f32) {
        self.agents[source.0].push_neighbor(target);
        self.edges.push(Edge {
            source,
            target,
            trust,
            strength,
        });
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.0)
    }

    pub(crate) fn agents_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.iter_mut()
    }

    pub fn count_state(&self, state: AgentState) -> usize {
        self.agents.iter().filter(|a| a.state() == state).count()
    }

    pub fn state_counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for agent in &self.agents {
            match agent.state() {
                AgentState::Susceptible => counts.susceptible += 1,
                AgentState::Infected => counts.infected += 1,
                AgentState::Resistant => counts.resistant += 1,
            }
        }
        counts
    }

    /// Mean critical thinking on a 0-100 scale, 0 for an empty population.
    pub fn mean_critical_thinking(&self) -> f32 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .agents
            .iter()
            .map(|a| a.attributes().critical_thinking)
            .sum();
        sum / self.agents.len() as f32 * 100.0
    }

    /// Read-only copy for network views
    pub fn to_snapshot(&self, day: u32) -> GraphSnapshot {
        let agents = self
            .agents
            .iter()
            .map(|agent| {
                let attrs = agent.attributes();
                AgentView {
                    id: agent.id().0,
                    state: agent.state(),
                    infection_day: agent.infection_day(),
                    skepticism: attrs.skepticism,
                    critical_thinking: attrs.critical_thinking,
                    social_influence: attrs.social_influence,
                    emotional_susceptibility: attrs.emotional_susceptibility,
                    trust_in_media: attrs.trust_in_media,
                    beliefs: agent.beliefs_held().iter().map(|b| b.0.clone()).collect(),
                    neighbors: agent.neighbors().iter().map(|n| n.0).collect(),
                }
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .map(|e| EdgeView {
                source: e.source.0,
                target: e.target.0,
                trust: e.trust,
                strength: e.strength,
            })
            .collect();

        GraphSnapshot { day, agents, edges }
    }
}
