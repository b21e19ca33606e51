//! telemetry.rs: tracing subscriber setup and metric descriptions.
//!
//! Diagnostics go to stderr so stdout only carries the human-readable report.
//! Metrics are recorded through the `metrics` facade; the binary installs no
//! recorder, so they are no-ops unless an embedding app (or a test) installs one.

use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a compact stderr subscriber. `RUST_LOG` overrides the default `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: a second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// One-time metrics registration.
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("edgar_requests_total", "HTTP requests sent to EDGAR.");
        describe_counter!(
            "edgar_request_errors_total",
            "EDGAR requests that failed (transport, status or decode)."
        );
        describe_histogram!("edgar_fetch_ms", "EDGAR request latency in milliseconds.");
        describe_counter!(
            "extract_spans_total",
            "Disclosure spans accepted, labelled by category."
        );
        describe_counter!(
            "report_entities_processed_total",
            "Entities that produced a report entry."
        );
        describe_counter!(
            "report_entities_skipped_total",
            "Entities skipped because no filing or document was available."
        );
    });
}
