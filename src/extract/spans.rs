//! Keyword-window span extraction.
//!
//! A "span" is a naive sentence: the run of non-period characters around a
//! keyword occurrence, up to and including the next period. Only periods
//! delimit spans, so abbreviations and decimals split sentences too; keeping
//! that rule keeps reports comparable across runs.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, CategoryMap, KeywordCatalog};

fn default_max_matches_per_keyword() -> usize {
    3
}
fn default_min_span_chars() -> usize {
    50
}
fn default_max_span_chars() -> usize {
    500
}
fn default_sample_chars() -> usize {
    200
}

/// Bounds applied while extracting and summarizing spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionLimits {
    /// Raw matches considered per keyword (before the length filter).
    #[serde(default = "default_max_matches_per_keyword")]
    pub max_matches_per_keyword: usize,
    /// Exclusive lower bound on span length, in chars.
    #[serde(default = "default_min_span_chars")]
    pub min_span_chars: usize,
    /// Exclusive upper bound on span length, in chars.
    #[serde(default = "default_max_span_chars")]
    pub max_span_chars: usize,
    /// Chars of the first span kept in the metrics sample.
    #[serde(default = "default_sample_chars")]
    pub sample_chars: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_matches_per_keyword: default_max_matches_per_keyword(),
            min_span_chars: default_min_span_chars(),
            max_span_chars: default_max_span_chars(),
            sample_chars: default_sample_chars(),
        }
    }
}

impl ExtractionLimits {
    pub fn accepts(&self, span: &str) -> bool {
        let n = span.chars().count();
        n > self.min_span_chars && n < self.max_span_chars
    }
}

#[derive(Debug, Clone)]
struct KeywordPattern {
    category: Category,
    keyword: String,
    re: Regex,
}

/// Compiled keyword catalog. Build once, run over any number of documents.
#[derive(Debug, Clone)]
pub struct SpanExtractor {
    patterns: Vec<KeywordPattern>,
    limits: ExtractionLimits,
}

/// `[^.]*\b<keyword>\b[^.]*\.`, case-insensitive.
pub fn keyword_span_regex(keyword: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"[^.]*\b{}\b[^.]*\.", regex::escape(keyword)))
        .case_insensitive(true)
        .build()
}

impl SpanExtractor {
    pub fn new(catalog: &KeywordCatalog, limits: ExtractionLimits) -> anyhow::Result<Self> {
        let mut patterns = Vec::new();
        for (category, keywords) in catalog.iter() {
            for keyword in keywords {
                let keyword = keyword.trim();
                if keyword.is_empty() {
                    continue;
                }
                let re = keyword_span_regex(keyword)
                    .map_err(|e| anyhow::anyhow!("compiling pattern for {keyword:?}: {e}"))?;
                patterns.push(KeywordPattern {
                    category,
                    keyword: keyword.to_string(),
                    re,
                });
            }
        }
        Ok(Self { patterns, limits })
    }

    pub fn limits(&self) -> &ExtractionLimits {
        &self.limits
    }

    /// Number of compiled (non-empty) keywords.
    pub fn keyword_count(&self) -> usize {
        self.patterns.len()
    }

    /// Spans per category, deduplicated within each category, first-seen order.
    pub fn extract(&self, text: &str) -> CategoryMap<Vec<String>> {
        let mut out: CategoryMap<Vec<String>> = CategoryMap::default();

        for p in &self.patterns {
            let bucket = out.get_mut(p.category);
            for m in p.re.find_iter(text).take(self.limits.max_matches_per_keyword) {
                let cleaned = m.as_str().trim();
                if !self.limits.accepts(cleaned) {
                    continue;
                }
                if bucket.iter().any(|s| s == cleaned) {
                    continue;
                }
                tracing::trace!(category = %p.category, keyword = %p.keyword, "span accepted");
                bucket.push(cleaned.to_string());
            }
        }

        out
    }
}
