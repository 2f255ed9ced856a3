use oapi_model::models::SchemaMatch;

use super::QueryEngine;

impl QueryEngine<'_> {
    /// Collects the named component schemas from every spec that defines them.
    ///
    /// A blank `second` compares a single name. Identical names are looked up
    /// twice and yield duplicate records.
    #[must_use]
    pub fn compare_schemas(&self, first: &str, second: Option<&str>) -> Vec<SchemaMatch> {
        let mut names = vec![first];
        if let Some(second) = second.filter(|name| !name.is_empty()) {
            names.push(second);
        }

        let mut matches = Vec::new();
        for spec in self.registry.all() {
            let Some(schemas) = spec.schemas() else {
                continue;
            };
            for name in &names {
                if let Some(schema) = schemas.get(*name) {
                    matches.push(SchemaMatch {
                        id: spec.id.clone(),
                        api: spec.title(),
                        schema_name: (*name).to_string(),
                        schema: schema.clone(),
                    });
                }
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::engine::QueryEngine;
    use crate::engine::fixtures::spec;
    use crate::registry::SpecRegistry;

    fn registry() -> SpecRegistry {
        SpecRegistry::from_specs([
            spec(
                "a.json",
                json!({
                    "info": {"title": "A"},
                    "components": {"schemas": {
                        "User": {"type": "object", "properties": {"id": {"type": "integer"}}},
                        "Product": {"type": "object"}
                    }}
                }),
            ),
            spec(
                "b.json",
                json!({
                    "info": {"title": "B"},
                    "components": {"schemas": {"User": {"type": "object", "properties": {"id": {"type": "string"}}}}}
                }),
            ),
            spec("c.json", json!({"info": {"title": "C"}})),
        ])
    }

    #[test]
    fn single_name_returns_one_record_per_defining_spec() {
        let registry = registry();
        let engine = QueryEngine::new(&registry);

        let matches = engine.compare_schemas("User", Some(""));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].api, "A");
        assert_eq!(matches[1].schema["properties"]["id"]["type"], "string");
        assert_eq!(engine.compare_schemas("User", None), matches);
    }

    #[test]
    fn two_names_return_union_of_matches() {
        let registry = registry();
        let matches = QueryEngine::new(&registry).compare_schemas("User", Some("Product"));

        let pairs: Vec<(&str, &str)> = matches
            .iter()
            .map(|found| (found.id.as_str(), found.schema_name.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [("a.json", "User"), ("a.json", "Product"), ("b.json", "User")]
        );
    }

    #[test]
    fn identical_names_are_looked_up_twice() {
        let registry = registry();
        let matches = QueryEngine::new(&registry).compare_schemas("Product", Some("Product"));
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn unknown_schema_returns_nothing() {
        let registry = registry();
        assert!(QueryEngine::new(&registry).compare_schemas("Order", None).is_empty());
    }
}
