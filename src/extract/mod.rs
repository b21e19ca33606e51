// src/extract/mod.rs
//! Filing text → per-category disclosure spans.

pub mod normalize;
pub mod spans;

pub use normalize::{collapse_whitespace, html_to_text, normalize_document};
pub use spans::{keyword_span_regex, ExtractionLimits, SpanExtractor};

use crate::catalog::CategoryMap;
use metrics::counter;

/// Normalize a raw filing document and extract its disclosure spans.
pub fn extract_document(extractor: &SpanExtractor, raw: &str) -> CategoryMap<Vec<String>> {
    crate::telemetry::ensure_metrics_described();

    let text = normalize_document(raw);
    let spans = extractor.extract(&text);

    for (category, list) in spans.iter() {
        counter!("extract_spans_total", "category" => category.as_str()).increment(list.len() as u64);
    }
    tracing::debug!(
        text_chars = text.chars().count(),
        environmental = spans.environmental.len(),
        social = spans.social.len(),
        governance = spans.governance.len(),
        "document extracted"
    );
    spans
}
