use async_trait::async_trait;
use thiserror::Error;

use crate::model::{MatchCandidate, ZoneRecord};

pub mod memory;
pub mod postgres;

/// Enumeration of errors for operations against the batch store.
/// Errors can originate from sqlx and are wrapped by us to provide
/// additional context.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("pool creation failed with: {error}")]
    PoolCreationError { error: sqlx::Error },
    #[error("{command} query failed with: {error}")]
    QueryError { command: String, error: sqlx::Error },
    #[error("transaction {command} failed with: {error}")]
    TransactionError { command: String, error: sqlx::Error },
}

/// Persistence seam for batch output.
///
/// A batch's records and matches are replaced as one logical unit keyed by
/// `batch_id`: previously persisted rows for the batch are removed before
/// the new rows land, so re-running a batch always converges on the latest
/// run's output. Rows are never upserted individually.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    async fn replace_batch(
        &self,
        batch_id: &str,
        records: &[ZoneRecord],
        matches: &[MatchCandidate],
    ) -> Result<(), StoreError>;
}
