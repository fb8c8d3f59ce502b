//! Benchmark setup error type.

use crate::source::SyntheticError;
use djset_core::PartitionError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic data generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Building or querying a partition failed.
    #[error("partition operation failed: {0}")]
    Partition(#[from] PartitionError),
}
