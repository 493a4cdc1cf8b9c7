use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Publication status of a zone record.
/// Approved: clear to publish; the default for every record in a fresh batch.
/// Pending: held back because the record sits on at least one steward-review pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "zone_record_status")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Approved,
    Pending,
}

/// What should happen to a surviving candidate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "zone_match_action")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchAction {
    AutoMerge,
    StewardReview,
}

/// How much we trust a candidate pair's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "zone_confidence_tier")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    High,
    Medium,
}

/// A raw zone row as supplied by the ingest collaborator, before any batch
/// bookkeeping is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawZone {
    pub location_id: i32,
    pub region: String,
    pub name: String,
    pub sub_class: String,
}

/// One reference entity as persisted for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ZoneRecord {
    pub location_id: i32,
    pub region: String,
    pub name: String,
    pub sub_class: String,
    pub batch_id: String,
    pub status: RecordStatus,
    pub source: String,
}

/// One retained candidate pair with its classification.
///
/// Invariants: `location_id_1 < location_id_2`, both records share `region`,
/// and `recommended_id` is one of the two ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct MatchCandidate {
    pub batch_id: String,
    pub location_id_1: i32,
    pub location_id_2: i32,
    pub region: String,
    pub name_1: String,
    pub name_2: String,
    pub score: i32,
    pub confidence_tier: ConfidenceTier,
    pub action: MatchAction,
    pub recommended_id: i32,
}

impl MatchCandidate {
    /// The canonical identity of this candidate's unordered pair.
    pub fn pair_key(&self) -> PairKey {
        PairKey {
            lo: self.location_id_1,
            hi: self.location_id_2,
        }
    }
}

/// Canonical identity of an unordered pair of records: ids are held as
/// (smaller, larger), so each unordered pair has exactly one representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub lo: i32,
    pub hi: i32,
}

impl PairKey {
    /// Build the canonical key for two distinct ids.
    /// Returns None for a self-pair, which is never a valid candidate.
    pub fn new(a: i32, b: i32) -> Option<Self> {
        match a.cmp(&b) {
            Ordering::Less => Some(PairKey { lo: a, hi: b }),
            Ordering::Greater => Some(PairKey { lo: b, hi: a }),
            Ordering::Equal => None,
        }
    }
}
