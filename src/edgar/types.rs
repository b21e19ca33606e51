// src/edgar/types.rs
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One filing from the EDGAR submissions index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    pub form: String,             // e.g., "10-K"
    pub accession: String,        // dashes stripped, e.g., "000032019323000106"
    pub filing_date: String,      // "YYYY-MM-DD" as published
    pub primary_document: String, // e.g., "aapl-20230930.htm"
    pub cik: String,              // owning entity, zero-padded
}

/// Where filings come from. `EdgarClient` talks HTTP; tests plug in fixtures.
///
/// Both calls fail soft: problems are logged by the implementation and show up
/// as an empty list / `None`.
#[async_trait]
pub trait FilingSource {
    async fn list_filings(&self, cik: &str, form_type: &str, max_count: usize) -> Vec<FilingRecord>;
    async fn fetch_document(&self, filing: &FilingRecord) -> Option<String>;
}

/// `submissions/CIK##########.json`, reduced to the fields we read.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Submissions {
    #[serde(default)]
    pub filings: Filings,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Filings {
    #[serde(default)]
    pub recent: RecentFilings,
}

/// Parallel arrays, aligned by index.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecentFilings {
    #[serde(default)]
    pub form: Vec<String>,
    #[serde(default, rename = "accessionNumber")]
    pub accession_number: Vec<String>,
    #[serde(default, rename = "filingDate")]
    pub filing_date: Vec<String>,
    #[serde(default, rename = "primaryDocument")]
    pub primary_document: Vec<String>,
}

impl RecentFilings {
    /// First `max_count` rows whose form equals `form_type`. Rows missing any
    /// parallel field are dropped.
    pub fn select(&self, cik: &str, form_type: &str, max_count: usize) -> Vec<FilingRecord> {
        let mut out = Vec::new();
        for (i, form) in self.form.iter().enumerate() {
            if out.len() >= max_count {
                break;
            }
            if form != form_type {
                continue;
            }
            let (Some(acc), Some(date), Some(doc)) = (
                self.accession_number.get(i),
                self.filing_date.get(i),
                self.primary_document.get(i),
            ) else {
                tracing::debug!(cik, index = i, "submissions row missing parallel fields");
                continue;
            };
            out.push(FilingRecord {
                form: form.clone(),
                accession: acc.replace('-', ""),
                filing_date: date.clone(),
                primary_document: doc.clone(),
                cik: cik.to_string(),
            });
        }
        out
    }
}
