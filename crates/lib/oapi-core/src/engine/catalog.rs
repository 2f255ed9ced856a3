use oapi_model::models::{ApiSummary, SpecProvenance};
use serde_json::Value;

use super::QueryEngine;

impl<'a> QueryEngine<'a> {
    /// Summarizes every loaded spec in registry order.
    #[must_use]
    pub fn list_apis(&self) -> Vec<ApiSummary> {
        self.registry
            .all()
            .iter()
            .map(|spec| ApiSummary {
                id: spec.id.clone(),
                title: spec.title(),
                version: spec.version(),
                description: spec.description(),
                endpoint_count: spec.path_count(),
            })
            .collect()
    }

    /// Returns the raw document for `id`, unfiltered.
    #[must_use]
    pub fn get_spec(&self, id: &str) -> Option<&'a Value> {
        self.registry.find_by_id(id).map(|spec| &spec.document)
    }

    /// Lists where each loaded spec came from.
    #[must_use]
    pub fn load_sources(&self) -> Vec<SpecProvenance> {
        self.registry
            .all()
            .iter()
            .map(|spec| SpecProvenance {
                id: spec.id.clone(),
                title: spec.title(),
                origin: spec.origin.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use oapi_model::schema::{PLACEHOLDER_DESCRIPTION, PLACEHOLDER_VERSION};
    use serde_json::json;

    use crate::engine::QueryEngine;
    use crate::engine::fixtures::{spec, users_and_products};
    use crate::registry::SpecRegistry;

    #[test]
    fn list_apis_counts_paths_not_operations() {
        let registry = users_and_products();
        let apis = QueryEngine::new(&registry).list_apis();

        assert_eq!(apis.len(), 2);
        assert_eq!(apis[0].id, "a.json");
        assert_eq!(apis[0].endpoint_count, 1);
        assert_eq!(apis[1].title, "B");
        assert_eq!(apis[1].description, PLACEHOLDER_DESCRIPTION);
    }

    #[test]
    fn list_apis_handles_specs_without_paths() {
        let registry = SpecRegistry::from_specs([spec("bare.json", json!({"info": {"title": "Bare"}}))]);
        let apis = QueryEngine::new(&registry).list_apis();

        assert_eq!(apis[0].endpoint_count, 0);
        assert_eq!(apis[0].version, PLACEHOLDER_VERSION);
    }

    #[test]
    fn get_spec_returns_document_or_none() {
        let registry = users_and_products();
        let engine = QueryEngine::new(&registry);

        let document = engine.get_spec("b.json").expect("b.json is loaded");
        assert_eq!(document["info"]["title"], "B");
        assert!(engine.get_spec("missing.json").is_none());

        let empty = SpecRegistry::new();
        assert!(QueryEngine::new(&empty).get_spec("missing.json").is_none());
    }

    #[test]
    fn load_sources_carry_origin() {
        let registry = users_and_products();
        let sources = QueryEngine::new(&registry).load_sources();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].origin.path.as_deref(), Some("a.json"));
    }
}
