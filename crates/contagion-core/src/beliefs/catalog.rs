//! Belief Catalog
//!
//! Preset beliefs plus user-created custom beliefs, and the current selection.

use rand::rngs::SmallRng;
use thiserror::Error;

use super::source::{GenerationError, ParameterSource};
use crate::components::belief::{BeliefError, BeliefId, BeliefProfile};
use crate::setup::preset_beliefs;

/// Errors managing the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown belief: {0}")]
    UnknownBelief(String),
    #[error("preset belief {0} cannot be removed")]
    PresetImmutable(BeliefId),
    #[error(transparent)]
    Belief(#[from] BeliefError),
    #[error("belief generation failed: {0}")]
    Generation(#[from] GenerationError),
}

#[derive(Debug, Clone)]
pub struct BeliefCatalog {
    presets: Vec<BeliefProfile>,
    customs: Vec<BeliefProfile>,
    selected: BeliefId,
}

impl Default for BeliefCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BeliefCatalog {
    pub fn new() -> Self {
        let presets = preset_beliefs();
        let selected = presets[0].id.clone();
        Self {
            presets,
            customs: Vec::new(),
            selected,
        }
    }

    /// Presets first, then customs in creation order
    pub fn all(&self) -> impl Iterator<Item = &BeliefProfile> {
        self.presets.iter().chain(self.customs.iter())
    }

    pub fn customs(&self) -> &[BeliefProfile] {
        &self.customs
    }

    pub fn get(&self, id: &BeliefId) -> Option<&BeliefProfile> {
        self.all().find(|b| &b.id == id)
    }

    /// Exact name match first, then case-insensitive
    pub fn find_by_name(&self, name: &str) -> Option<&BeliefProfile> {
        self.all()
            .find(|b| b.name == name)
            .or_else(|| self.all().find(|b| b.name.eq_ignore_ascii_case(name)))
    }

    pub fn selected(&self) -> &BeliefProfile {
        self.get(&self.selected).unwrap_or(&self.presets[0])
    }

    pub fn select(&mut self, id: &BeliefId) -> Result<&BeliefProfile, CatalogError> {
        if self.get(id).is_none() {
            return Err(CatalogError::UnknownBelief(id.to_string()));
        }
        self.selected = id.clone();
        Ok(self.selected())
    }

    /// Generate a custom belief and add it to the catalog.
    ///
    /// Name and description are checked before the source is consulted. On
    /// any failure the catalog is left unchanged.
    pub fn add_custom(
        &mut self,
        name: &str,
        description: &str,
        source: &dyn ParameterSource,
        rng: &mut SmallRng,
    ) -> Result<&BeliefProfile, CatalogError> {
        if name.trim().is_empty() {
            return Err(BeliefError::MissingField("name").into());
        }
        if description.trim().is_empty() {
            return Err(BeliefError::MissingField("description").into());
        }

        let params = source.generate(name, description)?;
        let belief = BeliefProfile::from_generated(name, description, &params, rng)?;
        tracing::info!(id = %belief.id, name = %belief.name, "created custom belief");

        self.customs.push(belief);
        Ok(&self.customs[self.customs.len() - 1])
    }

    /// Remove a custom belief. If it was selected, the first preset is selected.
    pub fn remove_custom(&mut self, id: &BeliefId) -> Result<BeliefProfile, CatalogError> {
        if self.presets.iter().any(|b| &b.id == id) {
            return Err(CatalogError::PresetImmutable(id.clone()));
        }
        let index = self
            .customs
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| CatalogError::UnknownBelief(id.to_string()))?;

        let removed = self.customs.remove(index);
        if &self.selected == id {
            self.selected = self.presets[0].id.clone();
        }
        Ok(removed)
    }
}
