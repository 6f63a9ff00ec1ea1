use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One normalized report row, ready for persistence. Absent provider values
/// stay `None` all the way to the database; they are never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub code: String,
    pub name: String,
    pub volume: Option<i64>,
    pub value: Option<Decimal>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub change: Option<Decimal>,
    pub transactions: Option<i64>,
}
