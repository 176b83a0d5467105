//! Integration tests for the lot-size store and its dated CSV cache

use chrono::{Duration, Local};
use nse_connector::{LotSizeStore, NseClient};
use services_common::ScreenerError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SAMPLE_CSV: &str = "\
UNDERLYING,SYMBOL,DEC-25,JAN-26,FEB-26
Punjab National Bank,PNB,8000,8000,8000
Bharat Heavy Electricals,BHEL,,2625,2625
State Bank of India,SBIN,750,750,750
Derivatives on,Symbol,,,
Bad Row Without Sizes,NOLOTS,,,
";

fn cache_file_for(days_ago: i64) -> String {
    let date = Local::now().date_naive() - Duration::days(days_ago);
    format!("fo_mktlots_{}.csv", date.format("%Y-%m-%d"))
}

/// Client that would fail if any network call were made
fn offline_client() -> NseClient {
    NseClient::with_endpoints(
        "http://127.0.0.1:1",
        "http://127.0.0.1:1/quote",
        "http://127.0.0.1:1/fo_mktlots.csv",
    )
    .unwrap()
}

async fn csv_server(csv: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fo_mktlots.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(csv.to_string()))
        .mount(&server)
        .await;
    server
}

fn client_for(server: &MockServer) -> NseClient {
    NseClient::with_endpoints(
        &server.uri(),
        &format!("{}/quote", server.uri()),
        &format!("{}/fo_mktlots.csv", server.uri()),
    )
    .unwrap()
}

#[tokio::test]
async fn todays_cache_is_used_without_download() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(cache_file_for(0)), SAMPLE_CSV).unwrap();

    // Offline client proves no network call happens
    let store = LotSizeStore::load(&offline_client(), dir.path()).await.unwrap();

    assert_eq!(store.get("PNB").unwrap(), 8000);
    assert_eq!(store.get("SBIN").unwrap(), 750);
}

#[tokio::test]
async fn recent_cache_is_accepted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(cache_file_for(3)), SAMPLE_CSV).unwrap();

    let store = LotSizeStore::load(&offline_client(), dir.path()).await.unwrap();
    assert_eq!(store.get("PNB").unwrap(), 8000);
}

#[tokio::test]
async fn stale_cache_triggers_fresh_download() {
    let dir = TempDir::new().unwrap();
    let stale = dir.path().join(cache_file_for(10));
    std::fs::write(&stale, "UNDERLYING,SYMBOL,DEC-25\nStale Co,STALE,1\n").unwrap();

    let server = csv_server(SAMPLE_CSV).await;
    let store = LotSizeStore::load(&client_for(&server), dir.path()).await.unwrap();

    // Fresh data won, today's file landed, the stale one was cleaned up
    assert_eq!(store.get("PNB").unwrap(), 8000);
    assert!(store.get("STALE").is_err());
    assert!(dir.path().join(cache_file_for(0)).exists());
    assert!(!stale.exists());
}

#[tokio::test]
async fn empty_cache_dir_downloads_and_caches() {
    let dir = TempDir::new().unwrap();
    let server = csv_server(SAMPLE_CSV).await;

    let store = LotSizeStore::load(&client_for(&server), dir.path()).await.unwrap();

    assert_eq!(store.len(), 3);
    assert!(dir.path().join(cache_file_for(0)).exists());
}

#[tokio::test]
async fn download_failure_without_cache_is_fatal() {
    let dir = TempDir::new().unwrap();

    let error = LotSizeStore::load(&offline_client(), dir.path()).await.unwrap_err();
    assert!(matches!(error, ScreenerError::Fetch(_)));
}

#[tokio::test]
async fn first_nonempty_month_column_wins() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(cache_file_for(0)), SAMPLE_CSV).unwrap();

    let store = LotSizeStore::load(&offline_client(), dir.path()).await.unwrap();

    // BHEL's DEC column is empty; JAN supplies the size
    assert_eq!(store.get("BHEL").unwrap(), 2625);
}

#[tokio::test]
async fn header_like_and_sizeless_rows_are_skipped() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(cache_file_for(0)), SAMPLE_CSV).unwrap();

    let store = LotSizeStore::load(&offline_client(), dir.path()).await.unwrap();

    assert!(store.get("Symbol").is_err());
    assert!(matches!(
        store.get("NOLOTS").unwrap_err(),
        ScreenerError::LotSizeNotFound(_)
    ));
}

#[tokio::test]
async fn unparsable_cache_with_no_rows_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(cache_file_for(0)), "HEADER ONLY\n").unwrap();

    let error = LotSizeStore::load(&offline_client(), dir.path()).await.unwrap_err();
    assert!(matches!(error, ScreenerError::Cache(_)));
}
