//! Output Generation
//!
//! Snapshot aggregation, the daily time series, and summary statistics.

pub mod recorder;
pub mod stats;

pub use recorder::*;
pub use stats::*;

use thiserror::Error;

/// Errors writing simulation output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
