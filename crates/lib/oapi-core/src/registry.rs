use std::collections::HashMap;

use oapi_model::models::LoadedSpec;

/// Ordered snapshot of loaded specs, at most one per id.
#[derive(Debug, Clone, Default)]
pub struct SpecRegistry {
    specs: Vec<LoadedSpec>,
    index: HashMap<String, usize>,
}

impl SpecRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from specs in load order.
    #[must_use]
    pub fn from_specs(specs: impl IntoIterator<Item = LoadedSpec>) -> Self {
        let mut registry = Self::new();
        registry.replace_all(specs);
        registry
    }

    /// Discards the current snapshot and installs `specs`.
    ///
    /// A repeated id replaces the earlier entry in place, so the registry keeps
    /// first-seen order while the last write wins.
    pub fn replace_all(&mut self, specs: impl IntoIterator<Item = LoadedSpec>) {
        self.specs.clear();
        self.index.clear();
        for spec in specs {
            if let Some(&position) = self.index.get(&spec.id) {
                self.specs[position] = spec;
            } else {
                self.index.insert(spec.id.clone(), self.specs.len());
                self.specs.push(spec);
            }
        }
    }

    #[must_use]
    pub fn all(&self) -> &[LoadedSpec] {
        &self.specs
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&LoadedSpec> {
        self.index.get(id).map(|&position| &self.specs[position])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
