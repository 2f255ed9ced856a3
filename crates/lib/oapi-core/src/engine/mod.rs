//! Read-only analytical queries over a registry snapshot.
//!
//! Every query recomputes its result from the snapshot it is given; nothing is
//! cached between calls and the loaded documents are never mutated.

use oapi_model::schema::recognized_method;
use serde_json::Value;

use crate::registry::SpecRegistry;

pub mod audit;
pub mod catalog;
pub mod schemas;
pub mod search;
pub mod stats;

/// Query engine borrowing one registry snapshot.
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    registry: &'a SpecRegistry,
}

impl<'a> QueryEngine<'a> {
    #[must_use]
    pub const fn new(registry: &'a SpecRegistry) -> Self {
        Self { registry }
    }
}

/// Yields `(VERB, operation)` for every recognized HTTP method key of a path item.
fn path_operations(path_item: &Value) -> impl Iterator<Item = (&'static str, &Value)> {
    path_item
        .as_object()
        .into_iter()
        .flatten()
        .filter_map(|(key, operation)| recognized_method(key).map(|verb| (verb, operation)))
}
