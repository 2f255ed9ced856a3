use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::{
    PLACEHOLDER_DESCRIPTION,
    PLACEHOLDER_TITLE,
    PLACEHOLDER_VERSION,
    SOURCE_KIND_FOLDER,
    SOURCE_KIND_REGISTRY,
    SOURCE_KIND_URL,
};

/// Kind of source a spec was loaded from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Registry,
    Url,
    Folder,
}

impl SourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registry => SOURCE_KIND_REGISTRY,
            Self::Url => SOURCE_KIND_URL,
            Self::Folder => SOURCE_KIND_FOLDER,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance metadata carried with every loaded spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecOrigin {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl SpecOrigin {
    #[must_use]
    pub fn registry(url: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Registry,
            url: Some(url.into()),
            path: None,
        }
    }

    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Url,
            url: Some(url.into()),
            path: None,
        }
    }

    #[must_use]
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Folder,
            url: None,
            path: Some(path.into()),
        }
    }
}

/// One ingested OpenAPI/Swagger document.
///
/// The document is kept verbatim (with internal `$ref`s already inlined by the
/// loader). Accessors read the handful of fields the query engine needs and
/// never fail on missing or mistyped metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSpec {
    pub id: String,
    pub document: Value,
    pub origin: SpecOrigin,
}

impl LoadedSpec {
    #[must_use]
    pub fn new(id: impl Into<String>, document: Value, origin: SpecOrigin) -> Self {
        Self {
            id: id.into(),
            document,
            origin,
        }
    }

    /// `info.title`, or the placeholder when absent.
    #[must_use]
    pub fn title(&self) -> String {
        self.info_field("title")
            .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string())
    }

    /// `info.version`, or the placeholder when absent.
    #[must_use]
    pub fn version(&self) -> String {
        self.declared_version()
            .unwrap_or_else(|| PLACEHOLDER_VERSION.to_string())
    }

    /// `info.description`, or the placeholder when absent.
    #[must_use]
    pub fn description(&self) -> String {
        self.info_field("description")
            .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string())
    }

    /// `info.version` exactly as declared, if any.
    #[must_use]
    pub fn declared_version(&self) -> Option<String> {
        self.info_field("version")
    }

    #[must_use]
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.document.get("paths").and_then(Value::as_object)
    }

    /// Number of distinct path templates.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.paths().map_or(0, Map::len)
    }

    #[must_use]
    pub fn schemas(&self) -> Option<&Map<String, Value>> {
        self.component("schemas")
    }

    #[must_use]
    pub fn security_schemes(&self) -> Option<&Map<String, Value>> {
        self.component("securitySchemes")
    }

    fn component(&self, name: &str) -> Option<&Map<String, Value>> {
        self.document
            .get("components")
            .and_then(|components| components.get(name))
            .and_then(Value::as_object)
    }

    fn info_field(&self, name: &str) -> Option<String> {
        let value = self.document.get("info")?.get(name)?;
        match value {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

/// Row returned by `list_apis`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    pub id: String,
    pub title: String,
    pub version: String,
    pub description: String,
    /// Distinct path templates, not operations.
    pub endpoint_count: usize,
}

/// One (path, method) pair matching a search query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub id: String,
    pub api_title: String,
    pub path: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
}

/// Per-spec breakdown inside `ApiStats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiBreakdown {
    pub id: String,
    pub title: String,
    pub version: String,
    /// Operations with a recognized verb, unlike `ApiSummary::endpoint_count`.
    pub endpoint_count: usize,
    pub methods: Vec<String>,
}

/// Aggregate statistics across the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiStats {
    pub total_apis: usize,
    pub total_endpoints: usize,
    pub method_counts: BTreeMap<String, usize>,
    pub common_paths: BTreeMap<String, usize>,
    pub versions: BTreeMap<String, usize>,
    pub apis: Vec<ApiBreakdown>,
}

/// A cross-spec inconsistency finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inconsistency {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub details: BTreeMap<String, Vec<String>>,
}

/// A named schema found in one spec.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMatch {
    pub id: String,
    pub api: String,
    pub schema_name: String,
    pub schema: Value,
}

/// Provenance row returned by `get_load_sources`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecProvenance {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub origin: SpecOrigin,
}

/// Outcome of one configured source during a load cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceReport {
    #[serde(rename = "type")]
    pub kind: SourceKind,
    pub location: String,
    pub loaded: usize,
    pub failed: usize,
}

/// Summary of the most recent load cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<String>,
    pub sources: Vec<SourceReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_metadata_uses_placeholders() {
        let spec = LoadedSpec::new("empty.json", json!({}), SpecOrigin::folder("empty.json"));

        assert_eq!(spec.title(), PLACEHOLDER_TITLE);
        assert_eq!(spec.version(), PLACEHOLDER_VERSION);
        assert_eq!(spec.description(), PLACEHOLDER_DESCRIPTION);
        assert!(spec.declared_version().is_none());
        assert_eq!(spec.path_count(), 0);
        assert!(spec.schemas().is_none());
    }

    #[test]
    fn numeric_version_is_rendered_and_empty_title_is_absent() {
        let spec = LoadedSpec::new(
            "numeric.yaml",
            json!({"info": {"title": "", "version": 2}}),
            SpecOrigin::folder("numeric.yaml"),
        );

        assert_eq!(spec.title(), PLACEHOLDER_TITLE);
        assert_eq!(spec.version(), "2");
    }

    #[test]
    fn provenance_flattens_origin() {
        let row = SpecProvenance {
            id: "a.json".to_string(),
            title: "A".to_string(),
            origin: SpecOrigin::url("https://example.test/a.json"),
        };
        let value = serde_json::to_value(&row).expect("serialize provenance");

        assert_eq!(
            value,
            json!({"id": "a.json", "title": "A", "type": "url", "url": "https://example.test/a.json"})
        );
    }
}
