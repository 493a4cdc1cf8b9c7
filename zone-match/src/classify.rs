use std::cmp::Ordering;

use crate::candidates::CandidatePair;
use crate::config::Thresholds;
use crate::model::{ConfidenceTier, MatchAction, MatchCandidate};

/// Turn a scored candidate pair into a match decision, or discard it when
/// the score falls short of the steward floor. Discarded pairs are dropped
/// entirely, never stored with a "none" action.
pub fn classify(
    batch_id: &str,
    pair: &CandidatePair<'_>,
    score: i32,
    thresholds: &Thresholds,
) -> Option<MatchCandidate> {
    if score < thresholds.steward_min() {
        return None;
    }

    let (action, confidence_tier) = if score >= thresholds.auto_merge() {
        (MatchAction::AutoMerge, ConfidenceTier::High)
    } else {
        (MatchAction::StewardReview, ConfidenceTier::Medium)
    };

    Some(MatchCandidate {
        batch_id: batch_id.to_owned(),
        location_id_1: pair.key.lo,
        location_id_2: pair.key.hi,
        region: pair.record_1.region.clone(),
        name_1: pair.record_1.name.clone(),
        name_2: pair.record_2.name.clone(),
        score,
        confidence_tier,
        action,
        recommended_id: recommended_id(pair),
    })
}

/// Suggested surviving identifier for a pair, applied regardless of action.
///
/// The record with the strictly longer trimmed display name wins; names that
/// tie on trimmed length (including names differing only in edge whitespace)
/// fall through to the numerically smaller id. Deterministic by value, never
/// by iteration order.
fn recommended_id(pair: &CandidatePair<'_>) -> i32 {
    let len_1 = pair.record_1.name.trim().chars().count();
    let len_2 = pair.record_2.name.trim().chars().count();

    match len_1.cmp(&len_2) {
        Ordering::Greater => pair.record_1.location_id,
        Ordering::Less => pair.record_2.location_id,
        Ordering::Equal => pair.key.lo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::generate;
    use crate::model::{RecordStatus, ZoneRecord};

    fn record(location_id: i32, name: &str) -> ZoneRecord {
        ZoneRecord {
            location_id,
            region: "BROOKLYN".to_string(),
            name: name.to_string(),
            sub_class: String::new(),
            batch_id: "b-1".to_string(),
            status: RecordStatus::Approved,
            source: "test".to_string(),
        }
    }

    fn classify_pair(
        name_1: &str,
        name_2: &str,
        score: i32,
        thresholds: &Thresholds,
    ) -> Option<MatchCandidate> {
        let records = vec![record(1, name_1), record(2, name_2)];
        let pairs = generate(&records);
        assert_eq!(pairs.len(), 1);
        classify("b-1", &pairs[0], score, thresholds)
    }

    #[test]
    fn sub_threshold_pairs_are_discarded() {
        let thresholds = Thresholds::new(90, 60).unwrap();
        assert!(classify_pair("Williamsburg", "Greenpoint", 59, &thresholds).is_none());
    }

    #[test]
    fn steward_floor_is_inclusive() {
        let thresholds = Thresholds::new(90, 60).unwrap();
        let candidate = classify_pair("Williamsburg", "Greenpoint", 60, &thresholds).unwrap();
        assert_eq!(candidate.action, MatchAction::StewardReview);
        assert_eq!(candidate.confidence_tier, ConfidenceTier::Medium);
    }

    #[test]
    fn auto_threshold_is_inclusive() {
        let thresholds = Thresholds::new(90, 60).unwrap();
        let candidate = classify_pair("Williamsburg", "Williamsburgh", 90, &thresholds).unwrap();
        assert_eq!(candidate.action, MatchAction::AutoMerge);
        assert_eq!(candidate.confidence_tier, ConfidenceTier::High);
    }

    #[test]
    fn action_is_monotonic_in_score() {
        let thresholds = Thresholds::new(90, 60).unwrap();
        let mut last_was_auto = false;
        for score in 60..=100 {
            let candidate = classify_pair("A B", "A C", score, &thresholds).unwrap();
            let is_auto = candidate.action == MatchAction::AutoMerge;
            assert!(
                is_auto || !last_was_auto,
                "action regressed from AUTO_MERGE at score {score}"
            );
            last_was_auto = is_auto;
        }
    }

    #[test]
    fn longer_display_name_wins_recommendation() {
        let thresholds = Thresholds::new(90, 60).unwrap();
        let candidate =
            classify_pair("Williamsburg North", "Williamsburg", 95, &thresholds).unwrap();
        assert_eq!(candidate.recommended_id, 1);

        let candidate =
            classify_pair("Williamsburg", "Williamsburg North", 95, &thresholds).unwrap();
        assert_eq!(candidate.recommended_id, 2);
    }

    #[test]
    fn edge_whitespace_does_not_decide_the_survivor() {
        // Trailing space: trimmed lengths tie, so the smaller id wins.
        let thresholds = Thresholds::new(90, 60).unwrap();
        let candidate = classify_pair("Williamsburg", "Williamsburg ", 100, &thresholds).unwrap();
        assert_eq!(candidate.recommended_id, 1);
    }

    #[test]
    fn equal_length_names_fall_back_to_smaller_id() {
        let thresholds = Thresholds::new(90, 60).unwrap();
        let candidate = classify_pair("Bushwick", "Bushwach", 75, &thresholds).unwrap();
        assert_eq!(candidate.recommended_id, 1);
    }

    #[test]
    fn candidate_carries_display_names_not_normalized_forms() {
        let thresholds = Thresholds::new(90, 60).unwrap();
        let candidate = classify_pair("Williamsburg!", "williamsburg", 100, &thresholds).unwrap();
        assert_eq!(candidate.name_1, "Williamsburg!");
        assert_eq!(candidate.name_2, "williamsburg");
    }
}
