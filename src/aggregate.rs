//! aggregate.rs: Per-category disclosure metrics.
//! Pure functions, no I/O.

use serde::{Deserialize, Serialize};

use crate::catalog::CategoryMap;

/// Sample text used when a category has no spans.
pub const NO_DISCLOSURE: &str = "No disclosure found";

/// Suffix appended to a truncated sample.
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMetrics {
    pub disclosure_count: usize,
    /// Mean span length in chars; exactly 0.0 for an empty list.
    pub avg_length: f64,
    pub sample: String,
}

/// First `max_chars` chars of `s` (char-boundary safe).
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

pub fn summarize(spans: &[String], sample_chars: usize) -> CategoryMetrics {
    let Some(first) = spans.first() else {
        return CategoryMetrics {
            disclosure_count: 0,
            avg_length: 0.0,
            sample: NO_DISCLOSURE.to_string(),
        };
    };

    let total: usize = spans.iter().map(|s| s.chars().count()).sum();
    CategoryMetrics {
        disclosure_count: spans.len(),
        avg_length: total as f64 / spans.len() as f64,
        sample: format!("{}{}", truncate_chars(first, sample_chars), ELLIPSIS),
    }
}

pub fn summarize_all(
    spans: &CategoryMap<Vec<String>>,
    sample_chars: usize,
) -> CategoryMap<CategoryMetrics> {
    spans.map(|_, list| summarize(list, sample_chars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_uses_sentinel_and_zero_average() {
        let m = summarize(&[], 200);
        assert_eq!(m.disclosure_count, 0);
        assert_eq!(m.avg_length, 0.0);
        assert_eq!(m.sample, NO_DISCLOSURE);
    }

    #[test]
    fn average_is_always_a_json_float() {
        let v = serde_json::to_value(summarize(&[], 200)).unwrap();
        assert_eq!(v["avg_length"], serde_json::json!(0.0));
        assert!(v["avg_length"].is_f64());
    }

    #[test]
    fn average_and_sample() {
        let spans = vec!["a".repeat(10), "b".repeat(30)];
        let m = summarize(&spans, 200);
        assert_eq!(m.disclosure_count, 2);
        assert!((m.avg_length - 20.0).abs() < 1e-9);
        assert_eq!(m.sample, format!("{}...", "a".repeat(10)));
    }

    #[test]
    fn sample_truncates_on_char_boundary() {
        let spans = vec!["é".repeat(300)];
        let m = summarize(&spans, 200);
        assert_eq!(m.sample.chars().count(), 203);
        assert!(m.sample.ends_with("..."));
    }
}
