use thiserror::Error;

use crate::store::StoreError;

/// Enumeration of fatal errors for one batch run of the match pipeline.
/// None of these are downgraded to warnings; discarding a sub-threshold
/// candidate is an expected outcome, not an error.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input record set contains location_id values that appear more
    /// than once. The batch aborts before any write; the caller must fix
    /// the upstream data and resubmit the same batch_id.
    #[error("duplicate location_id values in input: {0:?}")]
    InputIntegrity(Vec<i32>),

    /// Threshold configuration violates ordering or range constraints.
    /// Detected before any scoring begins.
    #[error("invalid threshold configuration: {0}")]
    Configuration(String),

    /// A store operation failed. Not retried internally; re-running the
    /// whole batch is safe because replacement is keyed by batch_id.
    #[error("batch persistence failed: {0}")]
    Persistence(#[from] StoreError),
}
