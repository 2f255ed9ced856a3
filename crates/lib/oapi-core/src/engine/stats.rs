use std::collections::BTreeSet;
use std::sync::LazyLock;

use oapi_model::models::{ApiBreakdown, ApiStats};
use oapi_model::schema::{NORMALIZED_PARAM, UNKNOWN_VERSION};
use regex::Regex;

use super::{QueryEngine, path_operations};

static PATH_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*?\}").expect("path parameter pattern is valid"));

/// Replaces every `{param}` segment of a path template with `{id}`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    PATH_PARAM.replace_all(path, NORMALIZED_PARAM).into_owned()
}

impl QueryEngine<'_> {
    /// Aggregates operation, method, path, and version counts.
    #[must_use]
    pub fn api_stats(&self) -> ApiStats {
        let mut stats = ApiStats {
            total_apis: self.registry.len(),
            ..ApiStats::default()
        };

        for spec in self.registry.all() {
            let mut endpoint_count = 0;
            let mut methods = BTreeSet::new();

            for (path, item) in spec.paths().into_iter().flatten() {
                *stats.common_paths.entry(normalize_path(path)).or_default() += 1;

                for (verb, _) in path_operations(item) {
                    endpoint_count += 1;
                    methods.insert(verb);
                    *stats.method_counts.entry(verb.to_string()).or_default() += 1;
                }
            }

            let version = spec
                .declared_version()
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string());
            *stats.versions.entry(version.clone()).or_default() += 1;

            stats.total_endpoints += endpoint_count;
            stats.apis.push(ApiBreakdown {
                id: spec.id.clone(),
                title: spec.title(),
                version,
                endpoint_count,
                methods: methods.into_iter().map(str::to_string).collect(),
            });
        }
        stats
    }
}
