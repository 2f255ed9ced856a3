//! Loaders that turn configured sources into `LoadedSpec`s.
//!
//! Sources are visited one at a time in priority order: the registry
//! discovery document, then explicit spec URLs, then the local folder. A
//! failing item is logged, recorded as a warning, and skipped.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use std::{error::Error, fmt};

use chrono::{SecondsFormat, Utc};
use oapi_model::models::{LoadReport, LoadedSpec, SourceReport};
use tracing::{info, warn};
use url::Url;

pub mod document;
pub mod folder;
pub mod remote;

pub use document::{parse_document, prepare_spec, resolve_refs, validate_spec};

/// Error raised while loading a single source item.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: std::io::Error },
    Http(reqwest::Error),
    Status { url: String, status: u16 },
    Parse(String),
    InvalidSpec(String),
    InvalidRegistry(String),
    InvalidUrl(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Status { url, status } => write!(f, "{url} returned HTTP {status}"),
            Self::Parse(message) => write!(f, "parse error: {message}"),
            Self::InvalidSpec(message) => write!(f, "invalid spec: {message}"),
            Self::InvalidRegistry(message) => write!(f, "invalid registry document: {message}"),
            Self::InvalidUrl(message) => write!(f, "invalid url: {message}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

/// Sources to load, in priority order.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub registry_url: Option<Url>,
    pub spec_urls: Vec<Url>,
    pub specs_dir: Option<PathBuf>,
    pub fetch_timeout: Duration,
}

impl LoaderConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registry_url: None,
            spec_urls: Vec::new(),
            specs_dir: None,
            fetch_timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub fn with_registry_url(mut self, registry_url: Url) -> Self {
        self.registry_url = Some(registry_url);
        self
    }

    #[must_use]
    pub fn with_spec_urls(mut self, spec_urls: Vec<Url>) -> Self {
        self.spec_urls = spec_urls;
        self
    }

    #[must_use]
    pub fn with_specs_dir(mut self, specs_dir: impl Into<PathBuf>) -> Self {
        self.specs_dir = Some(specs_dir.into());
        self
    }

    #[must_use]
    pub const fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    #[must_use]
    pub fn has_sources(&self) -> bool {
        self.registry_url.is_some() || !self.spec_urls.is_empty() || self.specs_dir.is_some()
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Specs and report produced by one load cycle.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub specs: Vec<LoadedSpec>,
    pub report: LoadReport,
}

/// Accumulates specs across sources, rejecting duplicate ids.
struct LoadCollector {
    specs: Vec<LoadedSpec>,
    seen: HashSet<String>,
    sources: Vec<SourceReport>,
    warnings: Vec<String>,
}

impl LoadCollector {
    fn new() -> Self {
        Self {
            specs: Vec::new(),
            seen: HashSet::new(),
            sources: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds a spec; returns `false` when its id was already loaded.
    fn push(&mut self, spec: LoadedSpec) -> bool {
        if self.seen.insert(spec.id.clone()) {
            self.specs.push(spec);
            true
        } else {
            self.warn(&spec.id, "duplicate spec id, keeping the first one loaded");
            false
        }
    }

    fn warn(&mut self, item: &str, message: impl fmt::Display) {
        warn!(item, "{message}");
        self.warnings.push(format!("{item}: {message}"));
    }

    fn finish(self) -> LoadOutcome {
        let count = self.specs.len();
        LoadOutcome {
            specs: self.specs,
            report: LoadReport {
                count,
                loaded_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                sources: self.sources,
                warnings: self.warnings,
            },
        }
    }
}

/// Loads specs from the configured sources.
#[derive(Debug, Clone)]
pub struct SpecLoader {
    config: LoaderConfig,
    client: reqwest::Client,
}

impl SpecLoader {
    /// Creates a loader with an HTTP client honoring the fetch timeout.
    ///
    /// # Errors
    /// Returns `LoadError::Http` if the HTTP client cannot be built.
    pub fn new(config: LoaderConfig) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(concat!("oapi-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    /// Runs one full load cycle. Never fails; per-item errors become warnings.
    pub async fn load(&self) -> LoadOutcome {
        let mut collector = LoadCollector::new();

        if let Some(registry_url) = &self.config.registry_url {
            remote::load_registry(&self.client, registry_url, &mut collector).await;
        }
        for spec_url in &self.config.spec_urls {
            remote::load_spec_url(&self.client, spec_url, &mut collector).await;
        }
        if let Some(specs_dir) = &self.config.specs_dir {
            folder::load_folder(specs_dir, &mut collector).await;
        }

        let outcome = collector.finish();
        info!(
            count = outcome.report.count,
            warnings = outcome.report.warnings.len(),
            "spec load complete"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oapi_model::models::SpecOrigin;
    use serde_json::json;

    #[test]
    fn collector_keeps_first_duplicate() {
        let mut collector = LoadCollector::new();
        assert!(collector.push(LoadedSpec::new("a.json", json!({"n": 1}), SpecOrigin::url("u1"))));
        assert!(!collector.push(LoadedSpec::new("a.json", json!({"n": 2}), SpecOrigin::folder("a.json"))));

        let outcome = collector.finish();
        assert_eq!(outcome.report.count, 1);
        assert_eq!(outcome.specs[0].document["n"], 1);
        assert_eq!(outcome.report.warnings.len(), 1);
        assert!(outcome.report.loaded_at.is_some());
    }

    #[test]
    fn config_without_sources() {
        assert!(!LoaderConfig::new().has_sources());
        assert!(LoaderConfig::new().with_specs_dir("specs").has_sources());
    }
}
