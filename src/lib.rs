// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod edgar;
pub mod extract;
pub mod report;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{summarize, CategoryMetrics, NO_DISCLOSURE};
pub use crate::catalog::{Category, CategoryMap, Entity, EntityCatalog, KeywordCatalog};
pub use crate::config::{CatalogConfig, Settings};
pub use crate::edgar::{EdgarClient, FetchError, FilingRecord, FilingSource};
pub use crate::extract::{ExtractionLimits, SpanExtractor};
pub use crate::report::{ReportDriver, RunResult};

use anyhow::Result;
use std::io::Write;

/// Full run against live EDGAR with the given settings: fetch, extract, print
/// the summary table, write the JSON artifact.
pub async fn run_with_settings<W: Write>(settings: &Settings, out: &mut W) -> Result<RunResult> {
    let client = EdgarClient::new(&settings.edgar)?;
    run_with_source(&client, settings, out).await
}

/// Same as [`run_with_settings`] but with any filing source.
pub async fn run_with_source<S, W>(source: &S, settings: &Settings, out: &mut W) -> Result<RunResult>
where
    S: FilingSource + Sync + ?Sized,
    W: Write,
{
    let driver = ReportDriver::from_settings(settings)?;
    let run = driver.run(source, out).await?;

    let rule = "=".repeat(70);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "ESG DISCLOSURE SUMMARY COMPARISON")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", report::render_table(&report::summary_rows(&run)))?;

    report::write_artifact(&settings.output_path, &run)?;
    writeln!(out, "\nResults saved to {}", settings.output_path.display())?;

    Ok(run)
}
