// tests/edgar_http.rs
//
// EdgarClient against an in-process fixture server (no external network).

mod common;

use common::*;
use esg_disclosure_extractor::edgar::{EdgarClient, EdgarConfig, FetchError, FilingRecord, FilingSource};

fn apple_10k() -> FilingRecord {
    FilingRecord {
        form: "10-K".into(),
        accession: "000032019323000106".into(),
        filing_date: "2023-11-03".into(),
        primary_document: "aapl-20230930.htm".into(),
        cik: APPLE_CIK.into(),
    }
}

#[tokio::test]
async fn lists_latest_matching_filing() {
    let addr = spawn_fixture_server().await;
    let client = EdgarClient::new(&edgar_config(addr)).unwrap();

    let filings = client.list_filings(APPLE_CIK, "10-K", 1).await;
    assert_eq!(filings, vec![apple_10k()]);

    let both = client.list_filings(APPLE_CIK, "10-K", 5).await;
    assert_eq!(both.len(), 2);
    assert_eq!(both[1].accession, "000032019322000108");
}

#[tokio::test]
async fn no_filings_of_requested_type_is_empty() {
    let addr = spawn_fixture_server().await;
    let client = EdgarClient::new(&edgar_config(addr)).unwrap();
    assert!(client.list_filings("0000000001", "10-K", 1).await.is_empty());
}

#[tokio::test]
async fn unexpected_shape_is_empty_not_error() {
    let addr = spawn_fixture_server().await;
    let client = EdgarClient::new(&edgar_config(addr)).unwrap();
    let r = client.try_list_filings("0000000002", "10-K", 1).await;
    assert!(matches!(r, Ok(ref v) if v.is_empty()), "got {r:?}");
}

#[tokio::test]
async fn non_json_body_is_decode_error_and_fails_soft() {
    let addr = spawn_fixture_server().await;
    let client = EdgarClient::new(&edgar_config(addr)).unwrap();
    let r = client.try_list_filings("0000000003", "10-K", 1).await;
    assert!(matches!(r, Err(FetchError::Decode { .. })), "got {r:?}");
    assert!(client.list_filings("0000000003", "10-K", 1).await.is_empty());
}

#[tokio::test]
async fn unknown_entity_is_status_error() {
    let addr = spawn_fixture_server().await;
    let client = EdgarClient::new(&edgar_config(addr)).unwrap();
    let r = client.try_list_filings("0000000099", "10-K", 1).await;
    match r {
        Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("expected status error, got {other:?}"),
    }
    assert!(client.list_filings("0000000099", "10-K", 1).await.is_empty());
}

#[tokio::test]
async fn missing_user_agent_contact_is_rejected() {
    let addr = spawn_fixture_server().await;
    let cfg = EdgarConfig {
        user_agent: "anonymous".into(),
        ..edgar_config(addr)
    };
    let client = EdgarClient::new(&cfg).unwrap();
    let r = client.try_list_filings(APPLE_CIK, "10-K", 1).await;
    match r {
        Err(FetchError::Status { status, .. }) => assert_eq!(status.as_u16(), 403),
        other => panic!("expected 403, got {other:?}"),
    }
}

#[tokio::test]
async fn fetches_document_from_archive_path() {
    let addr = spawn_fixture_server().await;
    let client = EdgarClient::new(&edgar_config(addr)).unwrap();

    let body = client.fetch_document(&apple_10k()).await.expect("document");
    assert!(body.contains("climate change"));

    let mut missing = apple_10k();
    missing.primary_document = "nope.htm".into();
    assert!(client.fetch_document(&missing).await.is_none());
}

#[tokio::test]
async fn transport_failure_fails_soft() {
    let base = closed_port_url().await;
    let cfg = EdgarConfig {
        user_agent: TEST_USER_AGENT.into(),
        data_base_url: base.clone(),
        archive_base_url: base,
        timeout: std::time::Duration::from_secs(2),
    };
    let client = EdgarClient::new(&cfg).unwrap();

    let r = client.try_list_filings(APPLE_CIK, "10-K", 1).await;
    assert!(matches!(r, Err(FetchError::Transport { .. })), "got {r:?}");
    assert!(client.list_filings(APPLE_CIK, "10-K", 1).await.is_empty());
    assert!(client.fetch_document(&apple_10k()).await.is_none());
}
