//! `zone-match` — batch deduplication and match classification for zone
//! reference records.
//!
//! Pure engine crate: receives pre-loaded rows, proposes candidate pairs
//! within each region, scores them by normalized-name similarity, classifies
//! the survivors and resolves publish statuses, then persists both outputs
//! through a [`store::ZoneStore`] under batch-scoped replace semantics.

pub mod candidates;
pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod resolve;
pub mod similarity;
pub mod store;

pub use config::Thresholds;
pub use error::PipelineError;
pub use model::{MatchCandidate, RawZone, ZoneRecord};
pub use pipeline::{run_batch, BatchInput, BatchSummary};
