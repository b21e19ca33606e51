// src/config.rs
//! Run settings from the environment (and `.env`) plus the entity/keyword catalog.
//!
//! Catalog lookup order:
//! 1) $ESG_CATALOG_PATH (must exist)
//! 2) config/esg_catalog.toml
//! 3) config/esg_catalog.json
//! 4) built-in catalog
//!
//! Sections missing from a catalog file keep their built-in defaults.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{default_keywords, Entity, EntityCatalog, KeywordCatalog};
use crate::edgar::{EdgarConfig, DEFAULT_TIMEOUT_SECS};
use crate::extract::ExtractionLimits;

pub const ENV_CATALOG_PATH: &str = "ESG_CATALOG_PATH";
pub const ENV_OUTPUT_PATH: &str = "ESG_OUTPUT_PATH";
pub const ENV_FORM_TYPE: &str = "ESG_FORM_TYPE";
pub const ENV_USER_AGENT: &str = "EDGAR_USER_AGENT";
pub const ENV_DATA_BASE_URL: &str = "EDGAR_DATA_BASE_URL";
pub const ENV_ARCHIVE_BASE_URL: &str = "EDGAR_ARCHIVE_BASE_URL";
pub const ENV_LIST_DELAY_MS: &str = "EDGAR_LIST_DELAY_MS";
pub const ENV_ENTITY_DELAY_MS: &str = "EDGAR_ENTITY_DELAY_MS";
pub const ENV_TIMEOUT_SECS: &str = "EDGAR_TIMEOUT_SECS";

pub const DEFAULT_OUTPUT_PATH: &str = "esg_extraction_results.json";
pub const DEFAULT_FORM_TYPE: &str = "10-K";
pub const DEFAULT_LIST_DELAY_MS: u64 = 500;
pub const DEFAULT_ENTITY_DELAY_MS: u64 = 1_000;

/// Entities, keywords and extraction bounds for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub entities: EntityCatalog,
    pub keywords: KeywordCatalog,
    pub limits: ExtractionLimits,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            entities: EntityCatalog::default(),
            keywords: default_keywords(),
            limits: ExtractionLimits::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub edgar: EdgarConfig,
    pub form_type: String,
    pub output_path: PathBuf,
    /// Pause after listing an entity's filings.
    pub list_delay: Duration,
    /// Pause after finishing an entity.
    pub entity_delay: Duration,
    pub catalog: CatalogConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edgar: EdgarConfig::default(),
            form_type: DEFAULT_FORM_TYPE.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            list_delay: Duration::from_millis(DEFAULT_LIST_DELAY_MS),
            entity_delay: Duration::from_millis(DEFAULT_ENTITY_DELAY_MS),
            catalog: CatalogConfig::default(),
        }
    }
}

impl Settings {
    /// Build settings from env vars; unset or unparsable numbers keep defaults.
    pub fn from_env() -> Result<Self> {
        let mut s = Settings::default();

        if let Some(ua) = env_str(ENV_USER_AGENT) {
            s.edgar.user_agent = ua;
        }
        if let Some(u) = env_str(ENV_DATA_BASE_URL) {
            s.edgar.data_base_url = u;
        }
        if let Some(u) = env_str(ENV_ARCHIVE_BASE_URL) {
            s.edgar.archive_base_url = u;
        }
        s.edgar.timeout = Duration::from_secs(env_u64(ENV_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS));
        if let Some(p) = env_str(ENV_OUTPUT_PATH) {
            s.output_path = PathBuf::from(p);
        }
        if let Some(f) = env_str(ENV_FORM_TYPE) {
            s.form_type = f;
        }
        s.list_delay = Duration::from_millis(env_u64(ENV_LIST_DELAY_MS, DEFAULT_LIST_DELAY_MS));
        s.entity_delay =
            Duration::from_millis(env_u64(ENV_ENTITY_DELAY_MS, DEFAULT_ENTITY_DELAY_MS));

        s.catalog = load_catalog_default()?;
        Ok(s)
    }
}

fn env_str(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_str(key)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

/// Load a catalog from an explicit path. Supports TOML or JSON formats.
pub fn load_catalog_from(path: &Path) -> Result<CatalogConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading catalog from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_catalog(&content, ext.as_str())
        .with_context(|| format!("parsing catalog {}", path.display()))
}

pub fn load_catalog_default() -> Result<CatalogConfig> {
    if let Some(p) = env_str(ENV_CATALOG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_catalog_from(&pb);
        }
        return Err(anyhow!("{ENV_CATALOG_PATH} points to non-existent path"));
    }
    let toml_p = PathBuf::from("config/esg_catalog.toml");
    if toml_p.exists() {
        return load_catalog_from(&toml_p);
    }
    let json_p = PathBuf::from("config/esg_catalog.json");
    if json_p.exists() {
        return load_catalog_from(&json_p);
    }
    Ok(CatalogConfig::default())
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    entities: Option<Vec<Entity>>,
    keywords: Option<KeywordCatalog>,
    limits: Option<ExtractionLimits>,
}

fn parse_catalog(s: &str, hint_ext: &str) -> Result<CatalogConfig> {
    let file: CatalogFile = match hint_ext {
        "toml" => toml::from_str(s)?,
        "json" => serde_json::from_str(s)?,
        _ => match serde_json::from_str(s) {
            Ok(v) => v,
            Err(_) => toml::from_str(s).map_err(|_| anyhow!("unsupported catalog format"))?,
        },
    };
    into_catalog(file)
}

fn into_catalog(file: CatalogFile) -> Result<CatalogConfig> {
    let defaults = CatalogConfig::default();

    let entities = match file.entities {
        Some(list) => EntityCatalog(clean_entities(list)?),
        None => defaults.entities,
    };
    let keywords = match file.keywords {
        Some(kw) => kw.map(|_, list| clean_keywords(list)),
        None => defaults.keywords,
    };
    let limits = file.limits.unwrap_or(defaults.limits);
    if limits.min_span_chars >= limits.max_span_chars {
        bail!(
            "limits.min_span_chars ({}) must be below limits.max_span_chars ({})",
            limits.min_span_chars,
            limits.max_span_chars
        );
    }

    Ok(CatalogConfig {
        entities,
        keywords,
        limits,
    })
}

fn clean_entities(items: Vec<Entity>) -> Result<Vec<Entity>> {
    let mut out: Vec<Entity> = Vec::with_capacity(items.len());
    for it in items {
        let name = it.name.trim().to_string();
        let cik = it.cik.trim().to_string();
        if name.is_empty() {
            bail!("entity with CIK {cik:?} has an empty name");
        }
        if cik.is_empty() || !cik.chars().all(|c| c.is_ascii_digit()) {
            bail!("entity {name:?} has invalid CIK {cik:?}");
        }
        if out.iter().any(|e| e.name == name) {
            bail!("duplicate entity name {name:?}");
        }
        out.push(Entity::new(name, cik));
    }
    Ok(out)
}

/// Trim, drop empties, drop repeats; order preserved.
fn clean_keywords(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|k| k == t) {
            out.push(t.to_string());
        }
    }
    out
}
