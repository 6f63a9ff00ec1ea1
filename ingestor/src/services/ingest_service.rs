//! The daily ingest pipeline: fetch, normalize, persist, notify.

use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};
use shared::error::IngestError;
use shared::twse::TwseClient;
use tracing::{error, info};

use crate::repositories::{daily_record_repository, security_repository};
use crate::services::normalizer::{self, FieldMap};
use crate::services::notifier::Notifier;

/// What a non-quiet run reports to the operator channel.
pub enum RunOutcome {
    Success { records: usize },
    Failure { reason: String },
}

/// One end-to-end run for a single trade date.
///
/// Returns `Ok(None)` when the exchange reported zero rows (non-trading
/// day): a quiet no-op, nothing persisted, nothing notified. Every other
/// path sends exactly one notification before returning.
pub async fn run_daily_ingest(
    db: &DatabaseConnection,
    client: &TwseClient,
    notifier: &Notifier,
    report_date: NaiveDate,
) -> Result<Option<usize>> {
    match ingest(db, client, report_date).await {
        Ok(None) => {
            info!(date = %report_date, "no trading rows reported, skipping run");
            Ok(None)
        }
        Ok(Some(records)) => {
            info!(date = %report_date, records, "daily ingest committed");
            notifier
                .notify(report_date, &RunOutcome::Success { records })
                .await;
            Ok(Some(records))
        }
        Err(e) => {
            error!(date = %report_date, error = %e, "daily ingest failed");
            notifier
                .notify(
                    report_date,
                    &RunOutcome::Failure {
                        reason: e.to_string(),
                    },
                )
                .await;
            Err(e.into())
        }
    }
}

async fn ingest(
    db: &DatabaseConnection,
    client: &TwseClient,
    report_date: NaiveDate,
) -> Result<Option<usize>, IngestError> {
    let report = client.fetch_daily(report_date).await?;
    if report.data.is_empty() {
        return Ok(None);
    }

    let field_map = FieldMap::default();
    let candidates = normalizer::normalize(&field_map, &report)?;
    info!(rows = candidates.len(), "normalized report rows");

    // All or nothing: an early `?` drops the uncommitted transaction,
    // which rolls it back.
    let txn = db.begin().await?;
    for candidate in &candidates {
        let security_id =
            security_repository::resolve_or_create(&txn, &candidate.code, &candidate.name)
                .await?;
        daily_record_repository::append(&txn, security_id, report_date, candidate).await?;
    }
    txn.commit().await?;

    Ok(Some(candidates.len()))
}
