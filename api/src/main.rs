use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use shared::entity::{daily_records, securities};
use shared::{get_db_connection, Config};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting TWSE archive API server...");

    let config = Config::from_env()?;
    let db = get_db_connection(&config.database_url).await?;
    info!("Connected to database");

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/securities", get(list_securities))
        .route("/api/securities/:code/records", get(list_daily_records))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(db));

    let listener = tokio::net::TcpListener::bind("0.0.0.0:9999").await?;
    info!("API server listening on http://0.0.0.0:9999");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Serialize)]
struct SecurityResponse {
    code: String,
    name: String,
}

#[derive(Serialize)]
struct DailyRecordResponse {
    trade_date: NaiveDate,
    volume: Option<i64>,
    value: Option<Decimal>,
    open: Option<Decimal>,
    high: Option<Decimal>,
    low: Option<Decimal>,
    close: Option<Decimal>,
    change: Option<Decimal>,
    transactions: Option<i64>,
}

impl From<daily_records::Model> for DailyRecordResponse {
    fn from(record: daily_records::Model) -> Self {
        Self {
            trade_date: record.trade_date,
            volume: record.volume,
            value: record.value,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            change: record.change,
            transactions: record.transactions,
        }
    }
}

async fn list_securities(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<SecurityResponse>>, (StatusCode, String)> {
    let rows = securities::Entity::find()
        .order_by_asc(securities::Column::Code)
        .all(db.as_ref())
        .await
        .map_err(internal_error)?;

    Ok(Json(
        rows.into_iter()
            .map(|s| SecurityResponse {
                code: s.code,
                name: s.name,
            })
            .collect(),
    ))
}

async fn list_daily_records(
    State(db): State<Arc<DatabaseConnection>>,
    Path(code): Path<String>,
) -> Result<Json<Vec<DailyRecordResponse>>, (StatusCode, String)> {
    let rows = daily_records::Entity::find()
        .filter(daily_records::Column::Code.eq(code))
        .order_by_asc(daily_records::Column::TradeDate)
        .all(db.as_ref())
        .await
        .map_err(internal_error)?;

    Ok(Json(rows.into_iter().map(DailyRecordResponse::from).collect()))
}

fn internal_error(err: sea_orm::DbErr) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
