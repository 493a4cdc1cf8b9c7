use thiserror::Error;

/// Enumeration of errors raised while reading the zone reference file.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse input file: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns {missing:?}; found {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
}
