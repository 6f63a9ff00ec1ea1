//! Appends one security's daily record to the ledger.

use chrono::NaiveDate;
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait, SqlErr};
use shared::entity::daily_records;
use shared::error::IngestError;
use shared::models::CandidateRecord;
use uuid::Uuid;

/// Insert one record for (security, trade date). The composite primary key
/// enforces uniqueness; a violation surfaces as `DuplicateRecord` and is
/// left for the orchestrator to treat as fatal — no overwrite, no skip.
pub async fn append<C: ConnectionTrait>(
    conn: &C,
    security_id: Uuid,
    trade_date: NaiveDate,
    candidate: &CandidateRecord,
) -> Result<(), IngestError> {
    let record = daily_records::ActiveModel {
        security_id: Set(security_id),
        trade_date: Set(trade_date),
        code: Set(candidate.code.clone()),
        volume: Set(candidate.volume),
        value: Set(candidate.value),
        open: Set(candidate.open),
        high: Set(candidate.high),
        low: Set(candidate.low),
        close: Set(candidate.close),
        change: Set(candidate.change),
        transactions: Set(candidate.transactions),
    };

    match daily_records::Entity::insert(record).exec(conn).await {
        Ok(_) => Ok(()),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(IngestError::DuplicateRecord {
                code: candidate.code.clone(),
                trade_date,
            }),
            _ => Err(IngestError::Database(e)),
        },
    }
}
