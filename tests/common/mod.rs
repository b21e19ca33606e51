// tests/common/mod.rs
// In-process EDGAR stand-in: serves the Apple fixtures and rejects requests
// without the expected User-Agent, like the real service does.
#![allow(dead_code)]

use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::get,
    Router,
};
use std::net::SocketAddr;

use esg_disclosure_extractor::edgar::EdgarConfig;

pub const TEST_USER_AGENT: &str = "Test Runner test@example.com";
pub const APPLE_CIK: &str = "0000320193";
pub const SUBMISSIONS_JSON: &str = include_str!("../fixtures/submissions_apple.json");
pub const FILING_HTML: &str = include_str!("../fixtures/aapl-20230930.htm");

pub const APPLE_ENV_1: &str =
    "Apple is committed to addressing climate change across its entire global supply chain.";
pub const APPLE_ENV_2: &str = "Our greenhouse gas emissions fell as we expanded renewable energy procurement for our facilities.";
pub const APPLE_SOCIAL_1: &str = "Our human capital strategy focuses on diversity, inclusion and the health & safety of every team member.";
pub const APPLE_GOV_1: &str =
    "The Board of Directors maintains an Audit Committee composed entirely of independent directors.";

fn user_agent_ok(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == TEST_USER_AGENT)
}

fn respond(headers: HeaderMap, content_type: &'static str, body: &'static str) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    if !user_agent_ok(&headers) {
        return (
            StatusCode::FORBIDDEN,
            [(header::CONTENT_TYPE, "text/plain")],
            "Undeclared Automated Tool",
        );
    }
    (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body)
}

pub fn fixture_router() -> Router {
    Router::new()
        .route(
            "/submissions/CIK0000320193.json",
            get(|h: HeaderMap| async move { respond(h, "application/json", SUBMISSIONS_JSON) }),
        )
        .route(
            // Has 10-Q filings only.
            "/submissions/CIK0000000001.json",
            get(|h: HeaderMap| async move {
                respond(
                    h,
                    "application/json",
                    r#"{"filings":{"recent":{"form":["10-Q"],"accessionNumber":["0000000001-24-000001"],"filingDate":["2024-05-01"],"primaryDocument":["q.htm"]}}}"#,
                )
            }),
        )
        .route(
            // Valid JSON, unexpected shape.
            "/submissions/CIK0000000002.json",
            get(|h: HeaderMap| async move {
                respond(h, "application/json", r#"{"filings":{"recent":{"form":"10-K"}}}"#)
            }),
        )
        .route(
            // Not JSON at all.
            "/submissions/CIK0000000003.json",
            get(|h: HeaderMap| async move { respond(h, "text/html", "<html>maintenance</html>") }),
        )
        .route(
            "/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm",
            get(|h: HeaderMap| async move { respond(h, "text/html", FILING_HTML) }),
        )
}

/// Bind on an ephemeral port and serve the fixture router in the background.
pub async fn spawn_fixture_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fixture_router()).await.unwrap();
    });
    addr
}

pub fn edgar_config(addr: SocketAddr) -> EdgarConfig {
    EdgarConfig {
        user_agent: TEST_USER_AGENT.to_string(),
        data_base_url: format!("http://{addr}"),
        archive_base_url: format!("http://{addr}"),
        timeout: std::time::Duration::from_secs(5),
    }
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
