//! Maps raw provider rows into canonical candidate records.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::error::IngestError;
use shared::models::CandidateRecord;
use shared::twse::DailyReport;

/// Marker the exchange prefixes to the change figure when trading was
/// halted and no change is computed.
const SUSPENSION_MARKER: char = 'X';

/// Placeholder the exchange reports for untraded sessions.
const ABSENT_PLACEHOLDER: &str = "--";

/// Immutable mapping from the provider's column labels to canonical fields.
/// Constructed by the orchestrator and passed in, never process-global.
pub struct FieldMap {
    pub code: &'static str,
    pub name: &'static str,
    pub volume: &'static str,
    pub value: &'static str,
    pub open: &'static str,
    pub high: &'static str,
    pub low: &'static str,
    pub close: &'static str,
    pub change: &'static str,
    pub transactions: &'static str,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            code: "證券代號",
            name: "證券名稱",
            volume: "成交股數",
            value: "成交金額",
            open: "開盤價",
            high: "最高價",
            low: "最低價",
            close: "收盤價",
            change: "漲跌價差",
            transactions: "成交筆數",
        }
    }
}

/// Turn every report row into a `CandidateRecord`, input order preserved.
/// A provider label missing from the payload fails the whole batch: it
/// means the upstream layout changed, not that one row is bad.
pub fn normalize(
    map: &FieldMap,
    report: &DailyReport,
) -> Result<Vec<CandidateRecord>, IngestError> {
    report
        .data
        .iter()
        .map(|row| {
            let labeled: HashMap<&str, &str> = report
                .fields
                .iter()
                .map(String::as_str)
                .zip(row.iter().map(String::as_str))
                .collect();
            normalize_row(map, &labeled)
        })
        .collect()
}

fn normalize_row(
    map: &FieldMap,
    row: &HashMap<&str, &str>,
) -> Result<CandidateRecord, IngestError> {
    let required = |label: &'static str| {
        row.get(label)
            .copied()
            .ok_or_else(|| IngestError::SchemaMismatch {
                field: label.to_string(),
            })
    };

    Ok(CandidateRecord {
        code: required(map.code)?.to_owned(),
        name: required(map.name)?.to_owned(),
        volume: parse_count(map.volume, required(map.volume)?)?,
        value: parse_decimal(map.value, required(map.value)?)?,
        open: parse_decimal(map.open, required(map.open)?)?,
        high: parse_decimal(map.high, required(map.high)?)?,
        low: parse_decimal(map.low, required(map.low)?)?,
        close: parse_decimal(map.close, required(map.close)?)?,
        change: parse_change(map.change, required(map.change)?)?,
        transactions: parse_count(map.transactions, required(map.transactions)?)?,
    })
}

fn is_absent(value: &str) -> bool {
    value.is_empty() || value == ABSENT_PLACEHOLDER
}

/// Count fields arrive with thousands separators ("1,234,567").
fn parse_count(field: &str, raw: &str) -> Result<Option<i64>, IngestError> {
    let cleaned = raw.trim().replace(',', "");
    if is_absent(&cleaned) {
        return Ok(None);
    }
    cleaned
        .parse::<u64>()
        .map(|n| Some(n as i64))
        .map_err(|_| IngestError::InvalidFieldValue {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Monetary fields may carry grouping separators and a currency marker.
/// Absent values stay absent; they are never coerced to zero.
fn parse_decimal(field: &str, raw: &str) -> Result<Option<Decimal>, IngestError> {
    let cleaned = raw.trim().replace(',', "");
    let cleaned = cleaned.trim_start_matches('$');
    if is_absent(cleaned) {
        return Ok(None);
    }
    cleaned
        .parse::<Decimal>()
        .map(Some)
        .map_err(|_| IngestError::InvalidFieldValue {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// A suspension-marked change means "no computed change" — absent, not
/// zero and not a parse error.
fn parse_change(field: &str, raw: &str) -> Result<Option<Decimal>, IngestError> {
    if raw.trim().starts_with(SUSPENSION_MARKER) {
        return Ok(None);
    }
    parse_decimal(field, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 10] = [
        "證券代號",
        "證券名稱",
        "成交股數",
        "成交金額",
        "開盤價",
        "最高價",
        "最低價",
        "收盤價",
        "漲跌價差",
        "成交筆數",
    ];

    fn report(fields: &[&str], data: &[&[&str]]) -> DailyReport {
        DailyReport {
            stat: "OK".to_owned(),
            date: "20240307".to_owned(),
            fields: fields.iter().map(|s| s.to_string()).collect(),
            data: data
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn normalizes_a_full_row() {
        let report = report(
            &LABELS,
            &[&[
                "2330", "TSMC", "1,000", "500,000", "$10.00", "$10.50", "$9.90", "$10.20",
                "X0.10", "50",
            ]],
        );

        let records = normalize(&FieldMap::default(), &report).unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.code, "2330");
        assert_eq!(record.name, "TSMC");
        assert_eq!(record.volume, Some(1000));
        assert_eq!(record.value, Some(dec("500000")));
        assert_eq!(record.open, Some(dec("10.00")));
        assert_eq!(record.high, Some(dec("10.50")));
        assert_eq!(record.low, Some(dec("9.90")));
        assert_eq!(record.close, Some(dec("10.20")));
        assert_eq!(record.change, None);
        assert_eq!(record.transactions, Some(50));
    }

    #[test]
    fn suspension_marked_change_is_absent_not_zero() {
        let report = report(
            &LABELS,
            &[&[
                "2330", "TSMC", "1,000", "500,000", "10.00", "10.50", "9.90", "10.20", "X0.10",
                "50",
            ]],
        );

        let record = &normalize(&FieldMap::default(), &report).unwrap()[0];
        assert_eq!(record.change, None);
        assert_ne!(record.change, Some(Decimal::ZERO));
    }

    #[test]
    fn signed_change_parses() {
        let report = report(
            &LABELS,
            &[&[
                "2330", "TSMC", "1,000", "500,000", "10.00", "10.50", "9.90", "10.20", "-0.30",
                "50",
            ]],
        );

        let record = &normalize(&FieldMap::default(), &report).unwrap()[0];
        assert_eq!(record.change, Some(dec("-0.30")));
    }

    #[test]
    fn blank_and_placeholder_values_are_absent() {
        let report = report(
            &LABELS,
            &[&["2330", "TSMC", "", "--", "--", "--", "--", "--", "", "--"]],
        );

        let record = &normalize(&FieldMap::default(), &report).unwrap()[0];
        assert_eq!(record.volume, None);
        assert_eq!(record.value, None);
        assert_eq!(record.open, None);
        assert_eq!(record.high, None);
        assert_eq!(record.low, None);
        assert_eq!(record.close, None);
        assert_eq!(record.change, None);
        assert_eq!(record.transactions, None);
    }

    #[test]
    fn missing_provider_column_fails_the_batch() {
        // No 成交筆數 column at all: an upstream layout change.
        let fields = &LABELS[..9];
        let report = report(
            fields,
            &[&[
                "2330", "TSMC", "1,000", "500,000", "10.00", "10.50", "9.90", "10.20", "0.10",
            ]],
        );

        let err = normalize(&FieldMap::default(), &report).unwrap_err();
        match err {
            IngestError::SchemaMismatch { field } => assert_eq!(field, "成交筆數"),
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_count_is_fatal() {
        let report = report(
            &LABELS,
            &[&[
                "2330", "TSMC", "abc", "500,000", "10.00", "10.50", "9.90", "10.20", "0.10",
                "50",
            ]],
        );

        let err = normalize(&FieldMap::default(), &report).unwrap_err();
        assert!(matches!(err, IngestError::InvalidFieldValue { .. }));
    }

    #[test]
    fn preserves_input_order() {
        let report = report(
            &LABELS,
            &[
                &["2330", "TSMC", "1", "1", "1", "1", "1", "1", "0.1", "1"],
                &["2317", "Foxconn", "2", "2", "2", "2", "2", "2", "0.2", "2"],
                &["0050", "Yuanta ETF", "3", "3", "3", "3", "3", "3", "0.3", "3"],
            ],
        );

        let records = normalize(&FieldMap::default(), &report).unwrap();
        let codes: Vec<&str> = records.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["2330", "2317", "0050"]);
    }

    #[test]
    fn grouped_transaction_counts_parse() {
        let report = report(
            &LABELS,
            &[&[
                "2330", "TSMC", "31,349,355", "27,520,390,871", "880.00", "885.00", "875.00",
                "878.00", "3.00", "28,465",
            ]],
        );

        let record = &normalize(&FieldMap::default(), &report).unwrap()[0];
        assert_eq!(record.volume, Some(31_349_355));
        assert_eq!(record.value, Some(dec("27520390871")));
        assert_eq!(record.transactions, Some(28_465));
    }
}
