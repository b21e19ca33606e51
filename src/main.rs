//! ESG disclosure extractor binary.
//! Loads settings, runs the sequential EDGAR pipeline and writes the JSON report.

use anyhow::Result;
use esg_disclosure_extractor::edgar::DEFAULT_USER_AGENT;
use esg_disclosure_extractor::{run_with_settings, telemetry, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env if present; no-op otherwise.
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "run failed");
        for cause in err.chain().skip(1) {
            tracing::error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let settings = Settings::from_env()?;
    if settings.edgar.user_agent == DEFAULT_USER_AGENT {
        tracing::warn!("EDGAR_USER_AGENT not set; SEC may throttle or reject the placeholder contact");
    }
    tracing::info!(
        entities = settings.catalog.entities.len(),
        form = %settings.form_type,
        output = %settings.output_path.display(),
        "settings loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_settings(&settings, &mut out).await?;
    Ok(())
}
