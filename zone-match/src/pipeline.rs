use std::collections::{BTreeSet, HashSet};

use metrics::counter;
use serde::Serialize;
use tracing::instrument;

use crate::candidates;
use crate::classify::classify;
use crate::config::Thresholds;
use crate::error::PipelineError;
use crate::model::{MatchCandidate, RawZone, RecordStatus, ZoneRecord};
use crate::resolve::resolve_statuses;
use crate::similarity;
use crate::store::ZoneStore;

/// Everything one batch run needs from its caller: the claimed batch id,
/// the provenance string stamped on every record, validated thresholds and
/// the raw rows from the ingest collaborator.
#[derive(Debug, Clone)]
pub struct BatchInput {
    pub batch_id: String,
    pub source: String,
    pub thresholds: Thresholds,
    pub rows: Vec<RawZone>,
}

/// Counts reported after a batch run, for operator logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub records: usize,
    pub candidates: usize,
    pub auto_merge: usize,
    pub steward_review: usize,
    pub pending_records: usize,
}

/// Run normalization, candidate generation, scoring, classification and
/// status resolution for one batch. Pure transformation: no IO happens here.
///
/// Aborts with `InputIntegrity` before producing anything if any
/// location_id appears more than once in the input.
#[instrument(skip_all, fields(batch_id = %input.batch_id, rows = input.rows.len()))]
pub fn match_batch(
    input: &BatchInput,
) -> Result<(Vec<ZoneRecord>, Vec<MatchCandidate>), PipelineError> {
    check_unique_ids(&input.rows)?;

    let mut records: Vec<ZoneRecord> = input
        .rows
        .iter()
        .map(|row| ZoneRecord {
            location_id: row.location_id,
            region: row.region.clone(),
            name: row.name.clone(),
            sub_class: row.sub_class.clone(),
            batch_id: input.batch_id.clone(),
            status: RecordStatus::Approved,
            source: input.source.clone(),
        })
        .collect();

    let matches: Vec<MatchCandidate> = {
        let pairs = candidates::generate(&records);
        counter!("zone_match_pairs_scored_total").increment(pairs.len() as u64);

        pairs
            .iter()
            .filter_map(|pair| {
                let score = similarity::score(&pair.norm_1, &pair.norm_2);
                classify(&input.batch_id, pair, score, &input.thresholds)
            })
            .collect()
    };

    resolve_statuses(&mut records, &matches);

    let auto_merge = matches
        .iter()
        .filter(|c| c.action == crate::model::MatchAction::AutoMerge)
        .count();
    counter!("zone_match_candidates_retained_total", "action" => "auto_merge")
        .increment(auto_merge as u64);
    counter!("zone_match_candidates_retained_total", "action" => "steward_review")
        .increment((matches.len() - auto_merge) as u64);

    Ok((records, matches))
}

/// Run the full pipeline for one batch and persist the result under
/// batch-scoped replace semantics. Retries are the caller's call: a failed
/// batch can simply be re-run with the same batch_id.
#[instrument(skip_all, fields(batch_id = %input.batch_id))]
pub async fn run_batch(
    store: &dyn ZoneStore,
    input: &BatchInput,
) -> Result<BatchSummary, PipelineError> {
    let (records, matches) = match_batch(input)?;

    store
        .replace_batch(&input.batch_id, &records, &matches)
        .await?;

    let summary = summarize(&records, &matches);
    tracing::info!(
        records = summary.records,
        candidates = summary.candidates,
        auto_merge = summary.auto_merge,
        steward_review = summary.steward_review,
        pending_records = summary.pending_records,
        "batch persisted"
    );

    Ok(summary)
}

fn summarize(records: &[ZoneRecord], matches: &[MatchCandidate]) -> BatchSummary {
    use crate::model::MatchAction;

    let auto_merge = matches
        .iter()
        .filter(|c| c.action == MatchAction::AutoMerge)
        .count();

    BatchSummary {
        records: records.len(),
        candidates: matches.len(),
        auto_merge,
        steward_review: matches.len() - auto_merge,
        pending_records: records
            .iter()
            .filter(|r| r.status == RecordStatus::Pending)
            .count(),
    }
}

/// Quality gate: location_id must be unique across the input set. Violation
/// is a hard failure for the whole batch, not a per-row defect.
fn check_unique_ids(rows: &[RawZone]) -> Result<(), PipelineError> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut duplicates = BTreeSet::new();

    for row in rows {
        if !seen.insert(row.location_id) {
            duplicates.insert(row.location_id);
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::InputIntegrity(
            duplicates.into_iter().collect(),
        ))
    }
}
