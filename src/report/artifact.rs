// src/report/artifact.rs
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::report::RunResult;

/// Write the run as pretty JSON, replacing any existing file at `path`.
pub fn write_artifact(path: &Path, run: &RunResult) -> Result<()> {
    let json = serde_json::to_string_pretty(run).context("serializing run result")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("writing results to {}", path.display()))?;
    tracing::info!(path = %path.display(), companies = run.companies.len(), "results written");
    Ok(())
}
