use oapi_model::models::SearchHit;
use serde_json::Value;

use super::{QueryEngine, path_operations};

impl QueryEngine<'_> {
    /// Case-insensitive substring search over every operation.
    ///
    /// The haystack for each operation is its path, method,
    /// summary, description, and operationId joined by spaces. Results follow
    /// spec, path, then method order. An empty query matches everything.
    #[must_use]
    pub fn search_endpoints(&self, query: &str) -> Vec<SearchHit> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();

        for spec in self.registry.all() {
            let Some(paths) = spec.paths() else {
                continue;
            };
            let mut api_title = None;
            for (path, item) in paths {
                for (verb, operation) in path_operations(item) {
                    if !operation.is_object() {
                        continue;
                    }
                    let summary = text_field(operation, "summary");
                    let description = text_field(operation, "description");
                    let operation_id = text_field(operation, "operationId");

                    let haystack = [
                        path.as_str(),
                        verb,
                        summary.unwrap_or_default(),
                        description.unwrap_or_default(),
                        operation_id.unwrap_or_default(),
                    ]
                    .join(" ")
                    .to_lowercase();
                    if !haystack.contains(&needle) {
                        continue;
                    }

                    hits.push(SearchHit {
                        id: spec.id.clone(),
                        api_title: api_title.get_or_insert_with(|| spec.title()).clone(),
                        path: path.clone(),
                        method: verb.to_string(),
                        summary: summary.map(str::to_string),
                        description: description.map(str::to_string),
                        operation_id: operation_id.map(str::to_string),
                    });
                }
            }
        }
        hits
    }
}

fn text_field<'v>(operation: &'v Value, name: &str) -> Option<&'v str> {
    operation.get(name).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::engine::QueryEngine;
    use crate::engine::fixtures::{spec, users_and_products};
    use crate::registry::SpecRegistry;

    fn catalog_registry() -> SpecRegistry {
        SpecRegistry::from_specs([spec(
            "shop.yaml",
            json!({
                "openapi": "3.0.0",
                "info": {"title": "Shop"},
                "paths": {
                    "/users/{id}": {
                        "parameters": [{"name": "id", "in": "path"}],
                        "get": {"summary": "Fetch a user", "operationId": "getUser"},
                        "delete": {"description": "Remove an account"}
                    },
                    "/orders": {
                        "x-owner": {"team": "users"},
                        "post": {"summary": "Create order", "operationId": "createOrder"}
                    }
                }
            }),
        )])
    }

    #[test]
    fn search_is_case_insensitive() {
        let registry = users_and_products();
        let engine = QueryEngine::new(&registry);

        let upper = engine.search_endpoints("USERS");
        let lower = engine.search_endpoints("users");
        assert_eq!(upper, lower);
        assert_eq!(lower.len(), 2);
        assert_eq!(lower[0].method, "GET");
        assert_eq!(lower[1].method, "POST");
        assert_eq!(lower[0].api_title, "A");
    }

    #[test]
    fn search_matches_operation_metadata() {
        let registry = catalog_registry();
        let engine = QueryEngine::new(&registry);

        let by_id = engine.search_endpoints("createorder");
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].path, "/orders");
        assert_eq!(by_id[0].operation_id.as_deref(), Some("createOrder"));

        let by_description = engine.search_endpoints("ACCOUNT");
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].method, "DELETE");
        assert!(by_description[0].summary.is_none());
    }

    #[test]
    fn search_matches_method_name() {
        let registry = catalog_registry();
        let hits = QueryEngine::new(&registry).search_endpoints("delete");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].path, "/users/{id}");
    }

    #[test]
    fn non_operation_keys_never_match() {
        let registry = catalog_registry();
        let hits = QueryEngine::new(&registry).search_endpoints("/orders x-owner");
        assert!(hits.is_empty());

        let users = QueryEngine::new(&registry).search_endpoints("users");
        assert!(users.iter().all(|hit| hit.path == "/users/{id}"));
    }

    #[test]
    fn unmatched_query_returns_empty() {
        let registry = users_and_products();
        assert!(QueryEngine::new(&registry).search_endpoints("inventory").is_empty());
    }
}
