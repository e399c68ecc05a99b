//! Agent adoption state.

use serde::{Deserialize, Serialize};

/// Belief adoption state of a single agent.
///
/// Transitions only move forward: `Susceptible -> Infected -> Resistant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    #[default]
    Susceptible,
    Infected,
    Resistant,
}

impl AgentState {
    /// Whether `next` is a legal forward transition from `self`.
    pub fn can_become(self, next: AgentState) -> bool {
        matches!(
            (self, next),
            (AgentState::Susceptible, AgentState::Infected)
                | (AgentState::Infected, AgentState::Resistant)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Susceptible => "susceptible",
            AgentState::Infected => "infected",
            AgentState::Resistant => "resistant",
        }
    }
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
