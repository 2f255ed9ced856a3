//! Fixed set of tool calls and their text rendering.
//!
//! Every call yields a single text payload: pretty-printed JSON on success, or
//! a human-readable error string. Missing arguments and unknown ids are
//! reported in-band rather than as protocol faults.

use serde::Serialize;
use tracing::debug;

use crate::engine::QueryEngine;
use crate::services::SpecCatalog;

/// One operation exposed over the tool protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    LoadSpecs,
    ListApis,
    GetApiSpec { filename: Option<String> },
    SearchEndpoints { query: Option<String> },
    GetApiStats,
    FindInconsistencies,
    CompareSchemas {
        schema1: Option<String>,
        schema2: Option<String>,
    },
    GetLoadSources,
}

impl ToolCall {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadSpecs => "load_specs",
            Self::ListApis => "list_apis",
            Self::GetApiSpec { .. } => "get_api_spec",
            Self::SearchEndpoints { .. } => "search_endpoints",
            Self::GetApiStats => "get_api_stats",
            Self::FindInconsistencies => "find_inconsistencies",
            Self::CompareSchemas { .. } => "compare_schemas",
            Self::GetLoadSources => "get_load_sources",
        }
    }
}

impl SpecCatalog {
    /// Executes `call` against the current snapshot and renders the payload.
    pub async fn execute(&self, call: ToolCall) -> String {
        debug!(tool = call.name(), "executing tool call");
        match self.run(call).await {
            Ok(payload) | Err(payload) => payload,
        }
    }

    async fn run(&self, call: ToolCall) -> Result<String, String> {
        let registry = self.snapshot().await;
        let engine = QueryEngine::new(&registry);
        match call {
            ToolCall::LoadSpecs => render(&self.reload().await),
            ToolCall::ListApis => render(&engine.list_apis()),
            ToolCall::GetApiSpec { filename } => {
                let filename = required("filename", filename)?;
                engine
                    .get_spec(&filename)
                    .map_or_else(|| Err(format!("API spec not found: {filename}")), render)
            }
            ToolCall::SearchEndpoints { query } => {
                let query = required("query", query)?;
                render(&engine.search_endpoints(&query))
            }
            ToolCall::GetApiStats => render(&engine.api_stats()),
            ToolCall::FindInconsistencies => render(&engine.find_inconsistencies()),
            ToolCall::CompareSchemas { schema1, schema2 } => {
                let schema1 = required("schema1", schema1)?;
                render(&engine.compare_schemas(&schema1, schema2.as_deref()))
            }
            ToolCall::GetLoadSources => render(&engine.load_sources()),
        }
    }
}

fn required(name: &str, value: Option<String>) -> Result<String, String> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| format!("Error: {name} is required"))
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|err| format!("Error: {err}"))
}
