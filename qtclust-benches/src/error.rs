//! Benchmark setup error type.
//!
//! Aggregates the error types that may arise during benchmark data
//! preparation so that setup functions can propagate failures with `?`
//! instead of using `.expect()`.

use crate::source::SyntheticError;
use qtclust_core::QtError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Building or running a clusterer failed.
    #[error("clustering failed: {0}")]
    Qt(#[from] QtError),
}
