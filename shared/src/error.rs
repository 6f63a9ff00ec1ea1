use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can abort a daily ingest run. Each variant rolls the
/// run's transaction back and is reported through a single failure
/// notification; none of them panic.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Transport-level failure talking to the exchange. The next scheduled
    /// run retries; the current run does not.
    #[error("source unavailable: {0}")]
    SourceUnavailable(#[from] reqwest::Error),

    /// The payload arrived but its envelope failed validation. Carries the
    /// provider's raw values for diagnostics.
    #[error("source data invalid: stat={stat:?} date={date:?}")]
    SourceDataInvalid { stat: String, date: String },

    /// A required provider column is missing, which means the upstream
    /// format changed.
    #[error("schema mismatch: missing provider field {field:?}")]
    SchemaMismatch { field: String },

    #[error("invalid value {value:?} for field {field:?}")]
    InvalidFieldValue { field: String, value: String },

    /// A record for this (security, trade date) already exists. No
    /// overwrite; a re-run for a persisted date is an operator problem.
    #[error("duplicate daily record for {code} on {trade_date}")]
    DuplicateRecord { code: String, trade_date: NaiveDate },

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}
