use anyhow::Result;
use chrono::{NaiveDate, Utc};
use chrono_tz::Asia::Taipei;
use shared::twse::TwseClient;
use shared::Config;
use tracing::info;

mod repositories;
mod services;

use services::ingest_service;
use services::notifier::Notifier;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting TWSE daily ingest...");

    let config = Config::from_env()?;

    // The scheduler passes nothing; the run covers today on the exchange's
    // calendar. An explicit YYYY-MM-DD argument is for operator re-runs.
    let report_date = match std::env::args().nth(1) {
        Some(arg) => NaiveDate::parse_from_str(&arg, "%Y-%m-%d")?,
        None => Utc::now().with_timezone(&Taipei).date_naive(),
    };
    info!(date = %report_date, "resolved report date");

    let db = shared::get_db_connection(&config.database_url).await?;
    let client = TwseClient::new(config.daily_price_url.clone());
    let notifier = Notifier::new(&config.bot_token, config.notify_chat_id);

    match ingest_service::run_daily_ingest(&db, &client, &notifier, report_date).await? {
        Some(records) => info!(records, "daily ingest finished"),
        None => info!("nothing ingested"),
    }

    Ok(())
}
