use oapi_model::models::{LoadedSpec, SourceKind, SourceReport, SpecOrigin};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{LoadCollector, LoadError, parse_document, prepare_spec};

/// One spec advertised by a registry discovery document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub name: Option<String>,
    pub url: Url,
}

impl RegistryEntry {
    fn id(&self) -> String {
        self.name.clone().unwrap_or_else(|| url_id(&self.url))
    }
}

/// Loads every spec listed by the registry document at `registry_url`.
pub(super) async fn load_registry(
    client: &reqwest::Client,
    registry_url: &Url,
    collector: &mut LoadCollector,
) {
    let mut report = SourceReport {
        kind: SourceKind::Registry,
        location: registry_url.to_string(),
        loaded: 0,
        failed: 0,
    };

    let entries = match fetch_registry(client, registry_url).await {
        Ok(entries) => entries,
        Err(err) => {
            report.failed += 1;
            collector.warn(registry_url.as_str(), err);
            collector.sources.push(report);
            return;
        }
    };
    debug!(registry = %registry_url, entries = entries.len(), "registry discovered");

    for (index, entry) in entries.into_iter().enumerate() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                report.failed += 1;
                collector.warn(&format!("{registry_url} entry {index}"), err);
                continue;
            }
        };
        let id = entry.id();
        match fetch_spec(client, &entry.url).await {
            Ok(document) => {
                let spec = LoadedSpec::new(id, document, SpecOrigin::registry(entry.url.as_str()));
                if collector.push(spec) {
                    report.loaded += 1;
                } else {
                    report.failed += 1;
                }
            }
            Err(err) => {
                report.failed += 1;
                collector.warn(&id, err);
            }
        }
    }

    collector.sources.push(report);
}

/// Loads a single spec from `spec_url`.
pub(super) async fn load_spec_url(
    client: &reqwest::Client,
    spec_url: &Url,
    collector: &mut LoadCollector,
) {
    let mut report = SourceReport {
        kind: SourceKind::Url,
        location: spec_url.to_string(),
        loaded: 0,
        failed: 0,
    };

    match fetch_spec(client, spec_url).await {
        Ok(document) => {
            let spec = LoadedSpec::new(url_id(spec_url), document, SpecOrigin::url(spec_url.as_str()));
            if collector.push(spec) {
                report.loaded += 1;
            } else {
                report.failed += 1;
            }
        }
        Err(err) => {
            report.failed += 1;
            collector.warn(spec_url.as_str(), err);
        }
    }

    collector.sources.push(report);
}

async fn fetch_registry(
    client: &reqwest::Client,
    registry_url: &Url,
) -> Result<Vec<Result<RegistryEntry, LoadError>>, LoadError> {
    let text = fetch_text(client, registry_url).await?;
    let document = parse_document(&text)?;
    registry_entries(&document, registry_url)
}

async fn fetch_spec(client: &reqwest::Client, url: &Url) -> Result<Value, LoadError> {
    let text = fetch_text(client, url).await?;
    prepare_spec(&text)
}

async fn fetch_text(client: &reqwest::Client, url: &Url) -> Result<String, LoadError> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(response.text().await?)
}

/// Extracts spec entries from a registry discovery document.
///
/// Accepts a top-level array or an object with an `apis` or `specs` array.
/// Entries are URL strings or objects with `url` (or `specUrl`/`spec_url`)
/// and an optional `name`/`id`. Relative URLs resolve against `base`.
///
/// Each entry is parsed on its own: a malformed entry becomes an `Err` in the
/// returned list (`InvalidRegistry` without a URL, `InvalidUrl` when it cannot
/// be resolved) and the remaining entries are kept.
///
/// # Errors
/// Returns `LoadError::InvalidRegistry` when no entry list is present.
pub fn registry_entries(
    document: &Value,
    base: &Url,
) -> Result<Vec<Result<RegistryEntry, LoadError>>, LoadError> {
    let list = match document {
        Value::Array(items) => items,
        Value::Object(object) => ["apis", "specs"]
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_array))
            .ok_or_else(|| {
                LoadError::InvalidRegistry("expected an `apis` or `specs` array".to_string())
            })?,
        _ => {
            return Err(LoadError::InvalidRegistry(
                "expected an array or object".to_string(),
            ));
        }
    };

    Ok(list.iter().map(|entry| parse_entry(entry, base)).collect())
}

fn parse_entry(entry: &Value, base: &Url) -> Result<RegistryEntry, LoadError> {
    let (raw_url, name) = match entry {
        Value::String(raw) => (raw.as_str(), None),
        Value::Object(object) => {
            let raw = ["url", "specUrl", "spec_url"]
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_str))
                .ok_or_else(|| LoadError::InvalidRegistry(format!("entry without url: {entry}")))?;
            let name = ["name", "id"]
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_str))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string);
            (raw, name)
        }
        _ => {
            return Err(LoadError::InvalidRegistry(format!(
                "unsupported entry: {entry}"
            )));
        }
    };

    let url = base
        .join(raw_url)
        .map_err(|err| LoadError::InvalidUrl(format!("{raw_url}: {err}")))?;
    Ok(RegistryEntry { name, url })
}

/// Derives a spec id from the last non-empty URL path segment.
#[must_use]
pub fn url_id(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
        .map_or_else(|| url.to_string(), str::to_string)
}
