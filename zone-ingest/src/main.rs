//! One-shot batch job: ingest a zone reference file, classify within-region
//! duplicates, and publish the resolved batch under its batch id.
use std::path::Path;

use envconfig::Envconfig;

use zone_match::pipeline::{run_batch, BatchInput};
use zone_match::store::postgres::PgZoneStore;
use zone_match::Thresholds;

use config::Config;

mod config;
mod error;
mod ingest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::init_from_env().expect("failed to load configuration from env");

    let thresholds = Thresholds::new(config.auto_merge_threshold, config.steward_min_threshold)?;
    let rows = ingest::load_zone_file(Path::new(&config.input_csv))?;

    let store = PgZoneStore::new(&config.database_url)?;
    let input = BatchInput {
        batch_id: config.batch_id.clone(),
        source: config.input_csv.clone(),
        thresholds,
        rows,
    };

    let summary = run_batch(&store, &input).await?;

    tracing::info!(
        batch_id = %input.batch_id,
        records = summary.records,
        candidates = summary.candidates,
        auto_merge = summary.auto_merge,
        steward_review = summary.steward_review,
        pending_records = summary.pending_records,
        "zone batch ingested"
    );

    Ok(())
}
