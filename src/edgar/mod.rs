// src/edgar/mod.rs
//! SEC EDGAR access: submissions index + archived filing documents.

pub mod types;

pub use types::{FilingRecord, FilingSource};

use anyhow::Context;
use async_trait::async_trait;
use metrics::{counter, histogram};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::edgar::types::Submissions;

pub const DEFAULT_USER_AGENT: &str = "esg-disclosure-extractor contact@example.com";
pub const DEFAULT_DATA_BASE_URL: &str = "https://data.sec.gov";
pub const DEFAULT_ARCHIVE_BASE_URL: &str = "https://www.sec.gov";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("body from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgarConfig {
    /// Contact string required by the SEC fair-access policy.
    pub user_agent: String,
    pub data_base_url: String,
    pub archive_base_url: String,
    pub timeout: Duration,
}

impl Default for EdgarConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            data_base_url: DEFAULT_DATA_BASE_URL.to_string(),
            archive_base_url: DEFAULT_ARCHIVE_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EdgarClient {
    client: Client,
    data_base_url: String,
    archive_base_url: String,
}

impl EdgarClient {
    pub fn new(cfg: &EdgarConfig) -> anyhow::Result<Self> {
        // gzip/deflate features make reqwest send `Accept-Encoding: gzip, deflate`
        // and decode the body transparently.
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.timeout)
            .build()
            .context("building EDGAR http client")?;
        Ok(Self {
            client,
            data_base_url: cfg.data_base_url.trim_end_matches('/').to_string(),
            archive_base_url: cfg.archive_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn submissions_url(&self, cik: &str) -> String {
        format!("{}/submissions/CIK{}.json", self.data_base_url, cik)
    }

    /// Archive paths use the CIK without its zero padding.
    pub fn document_url(&self, filing: &FilingRecord) -> String {
        format!(
            "{}/Archives/edgar/data/{}/{}/{}",
            self.archive_base_url,
            filing.cik.trim_start_matches('0'),
            filing.accession,
            filing.primary_document
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        crate::telemetry::ensure_metrics_described();
        counter!("edgar_requests_total").increment(1);
        let t0 = std::time::Instant::now();

        let result: Result<String, FetchError> = async {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: url.to_string(),
                    source,
                })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            resp.text().await.map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })
        }
        .await;

        histogram!("edgar_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        if result.is_err() {
            counter!("edgar_request_errors_total").increment(1);
        }
        result
    }

    /// Fallible form of [`FilingSource::list_filings`].
    pub async fn try_list_filings(
        &self,
        cik: &str,
        form_type: &str,
        max_count: usize,
    ) -> Result<Vec<FilingRecord>, FetchError> {
        let url = self.submissions_url(cik);
        let body = self.get_text(&url).await?;
        let value: serde_json::Value = serde_json::from_str(&body).map_err(|source| {
            counter!("edgar_request_errors_total").increment(1);
            FetchError::Decode {
                url: url.clone(),
                source,
            }
        })?;
        // Unexpected shapes are treated as "no filings", not as an error.
        let submissions: Submissions = serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!(error = %e, cik, "unexpected submissions shape");
            Submissions::default()
        });
        Ok(submissions.filings.recent.select(cik, form_type, max_count))
    }

    /// Fallible form of [`FilingSource::fetch_document`].
    pub async fn try_fetch_document(&self, filing: &FilingRecord) -> Result<String, FetchError> {
        self.get_text(&self.document_url(filing)).await
    }
}

#[async_trait]
impl FilingSource for EdgarClient {
    async fn list_filings(&self, cik: &str, form_type: &str, max_count: usize) -> Vec<FilingRecord> {
        match self.try_list_filings(cik, form_type, max_count).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, cik, "error fetching submissions");
                Vec::new()
            }
        }
    }

    async fn fetch_document(&self, filing: &FilingRecord) -> Option<String> {
        match self.try_fetch_document(filing).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::warn!(error = %e, cik = %filing.cik, accession = %filing.accession, "error fetching filing");
                None
            }
        }
    }
}
