use std::collections::HashMap;

use crate::model::{PairKey, ZoneRecord};
use crate::normalize::normalize;

/// Two records proposed for similarity scoring, with the comparison form of
/// each name computed once up front.
#[derive(Debug)]
pub struct CandidatePair<'a> {
    pub record_1: &'a ZoneRecord,
    pub record_2: &'a ZoneRecord,
    pub key: PairKey,
    pub norm_1: String,
    pub norm_2: String,
}

/// Propose the universe of record pairs eligible for scoring.
///
/// Records are grouped by their raw `region` value (exact equality, before
/// any normalization) and all pairs are formed within each group, so the
/// worst case is quadratic in the largest region rather than in the whole
/// batch. Cross-region pairs cannot be duplicates by construction. Each
/// unordered pair appears exactly once with `location_id_1 < location_id_2`,
/// and self-pairs are never produced.
pub fn generate(records: &[ZoneRecord]) -> Vec<CandidatePair<'_>> {
    let mut by_region: HashMap<&str, Vec<&ZoneRecord>> = HashMap::new();
    for record in records {
        by_region
            .entry(record.region.as_str())
            .or_default()
            .push(record);
    }

    // Sorting the groups and their members keeps the output order stable
    // across runs; callers treat the set as unordered but tests should not
    // have to.
    let mut groups: Vec<(&str, Vec<&ZoneRecord>)> = by_region.into_iter().collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let mut pairs = Vec::new();
    for (_, mut group) in groups {
        group.sort_by_key(|record| record.location_id);

        let normalized: Vec<String> = group
            .iter()
            .map(|record| normalize(&record.name))
            .collect();

        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let Some(key) = PairKey::new(group[i].location_id, group[j].location_id) else {
                    continue;
                };

                pairs.push(CandidatePair {
                    record_1: group[i],
                    record_2: group[j],
                    key,
                    norm_1: normalized[i].clone(),
                    norm_2: normalized[j].clone(),
                });
            }
        }
    }

    pairs
}
