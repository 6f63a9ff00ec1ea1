use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::error::IngestError;

/// Raw daily report payload as served by the exchange. Each row in `data`
/// is positionally aligned with the column labels in `fields`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyReport {
    #[serde(default)]
    pub stat: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct TwseClient {
    pub daily_price_url: String,
}

impl TwseClient {
    pub fn new(daily_price_url: String) -> Self {
        Self { daily_price_url }
    }

    /// Fetch the end-of-day report and validate its envelope against the
    /// requested date. Structural validation only; rows come back untouched.
    pub async fn fetch_daily(&self, report_date: NaiveDate) -> Result<DailyReport, IngestError> {
        let client = reqwest::Client::new();
        let response = client.get(&self.daily_price_url).send().await?;
        let report: DailyReport = response.error_for_status()?.json().await?;

        if report.stat != "OK" {
            return Err(IngestError::SourceDataInvalid {
                stat: report.stat,
                date: report.date,
            });
        }
        let expected = report_date.format("%Y%m%d").to_string();
        if report.date != expected {
            return Err(IngestError::SourceDataInvalid {
                stat: report.stat,
                date: report.date,
            });
        }

        info!(date = %report.date, rows = report.data.len(), "fetched daily report");
        Ok(report)
    }
}
