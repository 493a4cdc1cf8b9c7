use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::PgConnection;

use super::{StoreError, ZoneStore};
use crate::model::{MatchCandidate, ZoneRecord};

/// Batch store backed by the `zone_record` and `zone_match` tables.
///
/// Both tables' delete+insert pairs for a batch run inside one transaction,
/// so a replace is all-or-nothing: a failed run leaves the previous batch
/// contents untouched and a re-run converges on the latest input.
pub struct PgZoneStore {
    pool: PgPool,
}

impl PgZoneStore {
    /// Initialize a store with a lazy connection pool for the given URL.
    pub fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .connect_lazy(database_url)
            .map_err(|error| StoreError::PoolCreationError { error })?;

        Ok(Self { pool })
    }

    /// Initialize a store from an existing pool. Used by tests.
    pub fn new_from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ZoneStore for PgZoneStore {
    async fn replace_batch(
        &self,
        batch_id: &str,
        records: &[ZoneRecord],
        matches: &[MatchCandidate],
    ) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|error| StoreError::TransactionError {
                command: "BEGIN".to_owned(),
                error,
            })?;

        delete_records(&mut tx, batch_id).await?;
        delete_matches(&mut tx, batch_id).await?;
        insert_records(&mut tx, records).await?;
        insert_matches(&mut tx, matches).await?;

        tx.commit()
            .await
            .map_err(|error| StoreError::TransactionError {
                command: "COMMIT".to_owned(),
                error,
            })?;

        metrics::counter!("zone_store_records_written_total")
            .increment(records.len() as u64);
        metrics::counter!("zone_store_matches_written_total")
            .increment(matches.len() as u64);

        Ok(())
    }
}

async fn delete_records(conn: &mut PgConnection, batch_id: &str) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM zone_record WHERE batch_id = $1")
        .bind(batch_id)
        .execute(conn)
        .await
        .map_err(|error| StoreError::QueryError {
            command: "DELETE zone_record".to_owned(),
            error,
        })?;

    Ok(())
}

async fn delete_matches(conn: &mut PgConnection, batch_id: &str) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM zone_match WHERE batch_id = $1")
        .bind(batch_id)
        .execute(conn)
        .await
        .map_err(|error| StoreError::QueryError {
            command: "DELETE zone_match".to_owned(),
            error,
        })?;

    Ok(())
}

async fn insert_records(conn: &mut PgConnection, records: &[ZoneRecord]) -> Result<(), StoreError> {
    let base_query = r#"
INSERT INTO zone_record
    (location_id, region, name, sub_class, batch_id, status, source)
VALUES
    ($1, $2, $3, $4, $5, $6::zone_record_status, $7)
    "#;

    for record in records {
        sqlx::query(base_query)
            .bind(record.location_id)
            .bind(&record.region)
            .bind(&record.name)
            .bind(&record.sub_class)
            .bind(&record.batch_id)
            .bind(record.status)
            .bind(&record.source)
            .execute(&mut *conn)
            .await
            .map_err(|error| StoreError::QueryError {
                command: "INSERT zone_record".to_owned(),
                error,
            })?;
    }

    Ok(())
}

async fn insert_matches(
    conn: &mut PgConnection,
    matches: &[MatchCandidate],
) -> Result<(), StoreError> {
    let base_query = r#"
INSERT INTO zone_match
    (batch_id, location_id_1, location_id_2, region, name_1, name_2,
     score, confidence_tier, action, recommended_id)
VALUES
    ($1, $2, $3, $4, $5, $6, $7, $8::zone_confidence_tier, $9::zone_match_action, $10)
    "#;

    for candidate in matches {
        sqlx::query(base_query)
            .bind(&candidate.batch_id)
            .bind(candidate.location_id_1)
            .bind(candidate.location_id_2)
            .bind(&candidate.region)
            .bind(&candidate.name_1)
            .bind(&candidate.name_2)
            .bind(candidate.score)
            .bind(candidate.confidence_tier)
            .bind(candidate.action)
            .bind(candidate.recommended_id)
            .execute(&mut *conn)
            .await
            .map_err(|error| StoreError::QueryError {
                command: "INSERT zone_match".to_owned(),
                error,
            })?;
    }

    Ok(())
}
