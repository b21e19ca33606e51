//! # Report Driver
//! Sequential per-entity pipeline: list filings → fetch document → extract →
//! aggregate. Entities without a filing or document are skipped; whatever was
//! collected is still a complete run.
//!
//! Progress goes to the supplied writer (stdout in the binary), diagnostics to
//! `tracing`.

pub mod artifact;
pub mod summary;

pub use artifact::write_artifact;
pub use summary::{render_table, summary_rows, SummaryRow};

use anyhow::Result;
use chrono::{DateTime, Utc};
use metrics::counter;
use serde::{Serialize, Serializer};
use std::io::Write;
use std::time::Duration;

use crate::aggregate::{summarize_all, truncate_chars, CategoryMetrics};
use crate::catalog::{Category, CategoryMap, Entity, EntityCatalog};
use crate::config::{CatalogConfig, Settings};
use crate::edgar::{FilingRecord, FilingSource};
use crate::extract::{extract_document, SpanExtractor};

/// Chars of the first span echoed to the console per category.
const CONSOLE_SAMPLE_CHARS: usize = 300;

const RULE_WIDE: usize = 70;
const RULE_NARROW: usize = 50;

/// Everything gathered for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityReport {
    #[serde(skip)]
    pub company: String,
    pub filing_date: String,
    pub filing: FilingRecord,
    pub esg_data: CategoryMap<Vec<String>>,
    pub metrics: CategoryMap<CategoryMetrics>,
}

impl EntityReport {
    pub fn count(&self, category: Category) -> usize {
        self.metrics.get(category).disclosure_count
    }
}

/// One run. Companies keep processing order in the serialized map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    pub extraction_date: DateTime<Utc>,
    #[serde(serialize_with = "serialize_companies")]
    pub companies: Vec<EntityReport>,
}

impl RunResult {
    pub fn company(&self, name: &str) -> Option<&EntityReport> {
        self.companies.iter().find(|c| c.company == name)
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_companies<S: Serializer>(v: &Vec<EntityReport>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_map(v.iter().map(|r| (r.company.as_str(), r)))
}

pub struct ReportDriver {
    entities: EntityCatalog,
    extractor: SpanExtractor,
    sample_chars: usize,
    form_type: String,
    list_delay: Duration,
    entity_delay: Duration,
}

impl ReportDriver {
    pub fn new(
        catalog: &CatalogConfig,
        form_type: impl Into<String>,
        list_delay: Duration,
        entity_delay: Duration,
    ) -> Result<Self> {
        Ok(Self {
            entities: catalog.entities.clone(),
            extractor: SpanExtractor::new(&catalog.keywords, catalog.limits)?,
            sample_chars: catalog.limits.sample_chars,
            form_type: form_type.into(),
            list_delay,
            entity_delay,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(
            &settings.catalog,
            settings.form_type.clone(),
            settings.list_delay,
            settings.entity_delay,
        )
    }

    /// Process every entity in catalog order.
    pub async fn run<S, W>(&self, source: &S, out: &mut W) -> Result<RunResult>
    where
        S: FilingSource + Sync + ?Sized,
        W: Write,
    {
        crate::telemetry::ensure_metrics_described();
        let started = Utc::now();

        let rule = "=".repeat(RULE_WIDE);
        writeln!(out, "{rule}")?;
        writeln!(out, "ESG {} REPORT EXTRACTION FROM SEC EDGAR", self.form_type)?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Extraction Date: {}", started.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(out, "Companies: {}", self.entities.names().join(", "))?;
        writeln!(out, "{rule}")?;

        let mut companies = Vec::new();
        for entity in self.entities.iter() {
            match self.process_entity(source, entity, out).await? {
                Some(report) => {
                    counter!("report_entities_processed_total").increment(1);
                    companies.push(report);
                    tokio::time::sleep(self.entity_delay).await;
                }
                None => {
                    counter!("report_entities_skipped_total").increment(1);
                }
            }
        }

        tracing::info!(
            processed = companies.len(),
            skipped = self.entities.len() - companies.len(),
            "run finished"
        );

        Ok(RunResult {
            extraction_date: started,
            companies,
        })
    }

    async fn process_entity<S, W>(
        &self,
        source: &S,
        entity: &Entity,
        out: &mut W,
    ) -> Result<Option<EntityReport>>
    where
        S: FilingSource + Sync + ?Sized,
        W: Write,
    {
        let rule = "=".repeat(RULE_NARROW);
        writeln!(out, "\n{rule}")?;
        writeln!(out, "Processing: {} (CIK: {})", entity.name, entity.cik)?;
        writeln!(out, "{rule}")?;

        let filings = source.list_filings(&entity.cik, &self.form_type, 1).await;
        let Some(filing) = filings.into_iter().next() else {
            tracing::info!(entity = %entity.name, cik = %entity.cik, form = %self.form_type, "no matching filings");
            writeln!(out, "No {} filings found for {}", self.form_type, entity.name)?;
            return Ok(None);
        };
        writeln!(out, "Filing Date: {}", filing.filing_date)?;
        writeln!(out, "Accession: {}", filing.accession)?;

        tokio::time::sleep(self.list_delay).await;

        writeln!(out, "Downloading {} filing...", self.form_type)?;
        let Some(content) = source.fetch_document(&filing).await else {
            tracing::info!(entity = %entity.name, accession = %filing.accession, "filing document unavailable");
            writeln!(out, "Could not download filing for {}", entity.name)?;
            return Ok(None);
        };
        writeln!(out, "Filing size: {} characters", group_thousands(content.chars().count()))?;

        writeln!(out, "Extracting ESG disclosures...")?;
        let esg_data = extract_document(&self.extractor, &content);
        drop(content);
        let metrics = summarize_all(&esg_data, self.sample_chars);

        for (category, list) in esg_data.iter() {
            writeln!(out, "\n--- {category} ---")?;
            writeln!(out, "Disclosures found: {}", list.len())?;
            if let Some(first) = list.first() {
                writeln!(out, "Sample: {}...", truncate_chars(first, CONSOLE_SAMPLE_CHARS))?;
            }
        }

        Ok(Some(EntityReport {
            company: entity.name.clone(),
            filing_date: filing.filing_date.clone(),
            filing,
            esg_data,
            metrics,
        }))
    }
}

/// 1234567 -> "1,234,567"
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
