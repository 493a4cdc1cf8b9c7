use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{StoreError, ZoneStore};
use crate::model::{MatchCandidate, ZoneRecord};

/// In-memory `ZoneStore` with the same batch-replace semantics as the
/// Postgres store. Used by tests and by local runs without a database.
#[derive(Default)]
pub struct MemoryZoneStore {
    batches: Mutex<HashMap<String, StoredBatch>>,
}

#[derive(Default, Clone)]
struct StoredBatch {
    records: Vec<ZoneRecord>,
    matches: Vec<MatchCandidate>,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persisted records for a batch, empty if the batch was never written.
    pub fn records_for(&self, batch_id: &str) -> Vec<ZoneRecord> {
        let batches = self.batches.lock().expect("memory store lock poisoned");
        batches
            .get(batch_id)
            .map(|batch| batch.records.clone())
            .unwrap_or_default()
    }

    /// Persisted matches for a batch, empty if the batch was never written.
    pub fn matches_for(&self, batch_id: &str) -> Vec<MatchCandidate> {
        let batches = self.batches.lock().expect("memory store lock poisoned");
        batches
            .get(batch_id)
            .map(|batch| batch.matches.clone())
            .unwrap_or_default()
    }

    /// True when nothing has ever been persisted.
    pub fn is_empty(&self) -> bool {
        self.batches
            .lock()
            .expect("memory store lock poisoned")
            .is_empty()
    }
}

#[async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn replace_batch(
        &self,
        batch_id: &str,
        records: &[ZoneRecord],
        matches: &[MatchCandidate],
    ) -> Result<(), StoreError> {
        let mut batches = self.batches.lock().expect("memory store lock poisoned");
        batches.insert(
            batch_id.to_owned(),
            StoredBatch {
                records: records.to_vec(),
                matches: matches.to_vec(),
            },
        );

        Ok(())
    }
}
