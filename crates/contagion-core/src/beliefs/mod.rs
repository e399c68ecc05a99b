//! Beliefs
//!
//! The catalog of selectable beliefs and the contract for the external
//! parameter generator that produces custom ones.

pub mod catalog;
pub mod source;

pub use catalog::{BeliefCatalog, CatalogError};
pub use source::{parse_parameter_json, GenerationError, JsonFileSource, ParameterSource, StaticSource};
