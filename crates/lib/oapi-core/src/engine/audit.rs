use std::collections::BTreeMap;

use oapi_model::models::Inconsistency;
use oapi_model::schema::{INCONSISTENCY_AUTHENTICATION, make_scheme_key};
use serde_json::Value;

use super::QueryEngine;

impl QueryEngine<'_> {
    /// Reports cross-spec inconsistencies.
    ///
    /// Only authentication is checked: when the declared security schemes use
    /// more than one `type` across the registry, a single record lists every
    /// type with the `spec: scheme` names that use it.
    #[must_use]
    pub fn find_inconsistencies(&self) -> Vec<Inconsistency> {
        let mut by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for spec in self.registry.all() {
            for (name, scheme) in spec.security_schemes().into_iter().flatten() {
                let Some(kind) = scheme.get("type").and_then(Value::as_str) else {
                    continue;
                };
                by_type
                    .entry(kind.to_string())
                    .or_default()
                    .push(make_scheme_key(&spec.id, name));
            }
        }

        if by_type.len() <= 1 {
            return Vec::new();
        }

        let kinds: Vec<&str> = by_type.keys().map(String::as_str).collect();
        vec![Inconsistency {
            kind: INCONSISTENCY_AUTHENTICATION.to_string(),
            message: format!(
                "Multiple authentication types in use across APIs: {}",
                kinds.join(", ")
            ),
            details: by_type,
        }]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::engine::QueryEngine;
    use crate::engine::fixtures::{spec, users_and_products};
    use crate::registry::SpecRegistry;

    fn with_schemes(id: &str, schemes: serde_json::Value) -> oapi_model::models::LoadedSpec {
        spec(id, json!({"components": {"securitySchemes": schemes}}))
    }

    #[test]
    fn no_schemes_means_no_findings() {
        let registry = users_and_products();
        assert!(QueryEngine::new(&registry).find_inconsistencies().is_empty());
    }

    #[test]
    fn single_type_is_consistent() {
        let registry = SpecRegistry::from_specs([
            with_schemes("a.json", json!({"bearer": {"type": "http", "scheme": "bearer"}})),
            with_schemes("b.json", json!({"basic": {"type": "http", "scheme": "basic"}})),
        ]);
        assert!(QueryEngine::new(&registry).find_inconsistencies().is_empty());
    }

    #[test]
    fn mixed_types_produce_one_authentication_record() {
        let registry = SpecRegistry::from_specs([
            with_schemes(
                "a.json",
                json!({
                    "api_key": {"type": "apiKey", "in": "header", "name": "X-Key"},
                    "oauth": {"type": "oauth2", "flows": {}}
                }),
            ),
            with_schemes("b.json", json!({"token": {"type": "apiKey"}, "broken": {}})),
        ]);
        let findings = QueryEngine::new(&registry).find_inconsistencies();

        assert_eq!(findings.len(), 1);
        let finding = &findings[0];
        assert_eq!(finding.kind, "authentication");
        assert_eq!(finding.details.len(), 2);
        assert_eq!(finding.details["apiKey"], ["a.json: api_key", "b.json: token"]);
        assert_eq!(finding.details["oauth2"], ["a.json: oauth"]);
        assert!(finding.message.contains("apiKey"));
    }
}
