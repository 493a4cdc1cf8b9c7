use std::collections::HashSet;

use crate::model::{MatchAction, MatchCandidate, RecordStatus, ZoneRecord};

/// Fold match decisions back onto the record set to decide publish status.
///
/// Every record sitting on either side of a STEWARD_REVIEW candidate is
/// demoted to PENDING; everything else stays APPROVED. AUTO_MERGE pairs are
/// trusted and never block publication on their own.
pub fn resolve_statuses(records: &mut [ZoneRecord], candidates: &[MatchCandidate]) {
    let held_for_review: HashSet<i32> = candidates
        .iter()
        .filter(|candidate| candidate.action == MatchAction::StewardReview)
        .flat_map(|candidate| [candidate.location_id_1, candidate.location_id_2])
        .collect();

    for record in records.iter_mut() {
        record.status = if held_for_review.contains(&record.location_id) {
            RecordStatus::Pending
        } else {
            RecordStatus::Approved
        };
    }
}
