use std::sync::Arc;

use oapi_model::models::{LoadReport, LoadedSpec};
use tokio::sync::RwLock;

use crate::loaders::SpecLoader;
use crate::registry::SpecRegistry;

/// Shared catalog of loaded specs.
///
/// Holds the current registry snapshot behind an `Arc` so queries always read a
/// fully formed snapshot while a reload builds the next one off to the side.
#[derive(Clone)]
pub struct SpecCatalog {
    inner: Arc<SpecCatalogInner>,
}

/// Internal catalog state shared across clones.
struct SpecCatalogInner {
    loader: SpecLoader,
    snapshot: RwLock<Arc<SpecRegistry>>,
}

impl SpecCatalog {
    /// Creates an empty catalog; call `reload` to populate it.
    #[must_use]
    pub fn new(loader: SpecLoader) -> Self {
        Self {
            inner: Arc::new(SpecCatalogInner {
                loader,
                snapshot: RwLock::new(Arc::new(SpecRegistry::new())),
            }),
        }
    }

    /// Runs the loader, swaps in the new snapshot, and returns the load report.
    pub async fn reload(&self) -> LoadReport {
        let outcome = self.inner.loader.load().await;
        self.install(outcome.specs).await;
        outcome.report
    }

    /// Replaces the whole snapshot with `specs`.
    pub async fn install(&self, specs: Vec<LoadedSpec>) {
        let registry = Arc::new(SpecRegistry::from_specs(specs));
        *self.inner.snapshot.write().await = registry;
    }

    /// Returns the current snapshot.
    pub async fn snapshot(&self) -> Arc<SpecRegistry> {
        self.inner.snapshot.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oapi_model::models::SpecOrigin;
    use serde_json::json;

    use crate::loaders::LoaderConfig;

    fn catalog_for(dir: &std::path::Path) -> SpecCatalog {
        let loader = SpecLoader::new(LoaderConfig::new().with_specs_dir(dir)).expect("loader builds");
        SpecCatalog::new(loader)
    }

    #[tokio::test]
    async fn reload_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a.json"), r#"{"openapi": "3.0.0"}"#).expect("write");

        let catalog = catalog_for(dir.path());
        assert!(catalog.snapshot().await.is_empty());

        let report = catalog.reload().await;
        assert_eq!(report.count, 1);
        let before = catalog.snapshot().await;
        assert!(before.find_by_id("a.json").is_some());

        std::fs::remove_file(dir.path().join("a.json")).expect("remove");
        std::fs::write(dir.path().join("b.json"), r#"{"openapi": "3.1.0"}"#).expect("write");
        let report = catalog.reload().await;
        assert_eq!(report.count, 1);

        let after = catalog.snapshot().await;
        assert!(after.find_by_id("a.json").is_none());
        assert!(after.find_by_id("b.json").is_some());
        assert!(before.find_by_id("a.json").is_some(), "old snapshots stay intact");
    }

    #[tokio::test]
    async fn install_accepts_injected_specs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let catalog = catalog_for(dir.path());
        catalog
            .install(vec![LoadedSpec::new(
                "x.json",
                json!({}),
                SpecOrigin::url("https://x.test/x.json"),
            )])
            .await;
        assert_eq!(catalog.snapshot().await.len(), 1);
    }
}
