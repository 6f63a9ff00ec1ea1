//! HTTP-boundary tests for the TWSE source client.

use chrono::NaiveDate;
use mockito::Server;
use serde_json::json;
use shared::{IngestError, TwseClient};

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
}

#[tokio::test]
async fn returns_raw_rows_on_valid_envelope() {
    let mut server = Server::new_async().await;
    let body = json!({
        "stat": "OK",
        "date": "20240307",
        "fields": ["證券代號", "證券名稱"],
        "data": [["2330", "台積電"], ["2317", "鴻海"]],
    });
    let mock = server
        .mock("GET", "/daily")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = TwseClient::new(format!("{}/daily", server.url()));
    let report = client.fetch_daily(report_date()).await.unwrap();

    assert_eq!(report.stat, "OK");
    assert_eq!(report.fields, vec!["證券代號", "證券名稱"]);
    assert_eq!(report.data.len(), 2);
    assert_eq!(report.data[0][0], "2330");
    mock.assert_async().await;
}

#[tokio::test]
async fn rejects_payload_with_non_ok_stat() {
    let mut server = Server::new_async().await;
    let body = json!({
        "stat": "很抱歉, 沒有符合條件的資料!",
    });
    server
        .mock("GET", "/daily")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = TwseClient::new(format!("{}/daily", server.url()));
    let err = client.fetch_daily(report_date()).await.unwrap_err();

    match err {
        IngestError::SourceDataInvalid { stat, .. } => {
            assert_eq!(stat, "很抱歉, 沒有符合條件的資料!");
        }
        other => panic!("expected SourceDataInvalid, got {other:?}"),
    }
}

#[tokio::test]
async fn rejects_payload_dated_differently_even_when_stat_is_ok() {
    let mut server = Server::new_async().await;
    let body = json!({
        "stat": "OK",
        "date": "20240306",
        "fields": [],
        "data": [],
    });
    server
        .mock("GET", "/daily")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = TwseClient::new(format!("{}/daily", server.url()));
    let err = client.fetch_daily(report_date()).await.unwrap_err();

    match err {
        IngestError::SourceDataInvalid { stat, date } => {
            assert_eq!(stat, "OK");
            assert_eq!(date, "20240306");
        }
        other => panic!("expected SourceDataInvalid, got {other:?}"),
    }
}

#[tokio::test]
async fn maps_http_failure_to_source_unavailable() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/daily")
        .with_status(500)
        .create_async()
        .await;

    let client = TwseClient::new(format!("{}/daily", server.url()));
    let err = client.fetch_daily(report_date()).await.unwrap_err();

    assert!(matches!(err, IngestError::SourceUnavailable(_)));
}
