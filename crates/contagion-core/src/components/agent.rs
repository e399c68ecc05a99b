//! Agent Components
//!
//! Population members: fixed attributes, adoption state, held beliefs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use contagion_events::AgentState;

use super::belief::BeliefId;

/// Unique identifier for an agent, stable for the lifetime of its graph.
/// Doubles as the agent's index in the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent_{:04}", self.0)
    }
}

/// Agent attributes - fixed at creation
/// All values are 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    /// Doubt toward new claims
    pub skepticism: f32,
    /// Tendency to evaluate evidence
    pub critical_thinking: f32,
    /// Reach over others when spreading
    pub social_influence: f32,
    /// Responsiveness to emotional content
    pub emotional_susceptibility: f32,
    /// Trust placed in media sources
    pub trust_in_media: f32,
}

impl Attributes {
    pub fn is_valid(&self) -> bool {
        [
            self.skepticism,
            self.critical_thinking,
            self.social_influence,
            self.emotional_susceptibility,
            self.trust_in_media,
        ]
        .iter()
        .all(|v| (0.0..=1.0).contains(v))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            skepticism: 0.5,
            critical_thinking: 0.5,
            social_influence: 0.5,
            emotional_susceptibility: 0.5,
            trust_in_media: 0.5,
        }
    }
}

/// A single member of the population.
///
/// State only moves forward; `infect` and `recover` refuse any other edge of
/// the state machine.
#[derive(Debug, Clone)]
pub struct Agent {
    id: AgentId,
    attributes: Attributes,
    state: AgentState,
    infection_day: Option<u32>,
    beliefs_held: BTreeSet<BeliefId>,
    neighbors: Vec<AgentId>,
}

impl Agent {
    pub fn new(id: AgentId, attributes: Attributes) -> Self {
        Self {
            id,
            attributes,
            state: AgentState::Susceptible,
            infection_day: None,
            beliefs_held: BTreeSet::new(),
            neighbors: Vec::new(),
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn is_susceptible(&self) -> bool {
        self.state == AgentState::Susceptible
    }

    pub fn is_infected(&self) -> bool {
        self.state == AgentState::Infected
    }

    pub fn infection_day(&self) -> Option<u32> {
        self.infection_day
    }

    /// Days elapsed since infection, 0 if never infected.
    pub fn days_infected(&self, day: u32) -> u32 {
        self.infection_day
            .map(|infected_on| day.saturating_sub(infected_on))
            .unwrap_or(0)
    }

    pub fn beliefs_held(&self) -> &BTreeSet<BeliefId> {
        &self.beliefs_held
    }

    pub fn neighbors(&self) -> &[AgentId] {
        &self.neighbors
    }

    pub fn has_neighbor(&self, id: AgentId) -> bool {
        self.neighbors.contains(&id)
    }

    /// Susceptible -> Infected. Returns false if the agent was not susceptible.
    pub fn infect(&mut self, day: u32, belief: &BeliefId) -> bool {
        if !self.state.can_become(AgentState::Infected) {
            return false;
        }
        self.state = AgentState::Infected;
        self.infection_day = Some(day);
        self.beliefs_held.insert(belief.clone());
        true
    }

    /// Infected -> Resistant. Returns false if the agent was not infected.
    pub fn recover(&mut self) -> bool {
        if !self.state.can_become(AgentState::Resistant) {
            return false;
        }
        self.state = AgentState::Resistant;
        true
    }

    pub(crate) fn push_neighbor(&mut self, id: AgentId) {
        self.neighbors.push(id);
    }
}
