//! MCP server implementation for oapi-mcp.
//!
//! This crate wires the spec catalog into rmcp tool handlers and exposes the
//! MCP-facing API surface for loading and querying OpenAPI specs.

mod helpers;
mod tools;
pub mod server;

use oapi_core::dispatch::ToolCall;
use oapi_core::services::SpecCatalog;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r"oapi-mcp indexes a collection of OpenAPI/Swagger specs and answers questions about them.

Workflow:
1. Specs are loaded at startup from the configured sources (registry, URLs, local folder).
   Call `load_specs` to reload them; `get_load_sources` shows where each spec came from.
2. Browse:
   - `list_apis` summarizes every loaded spec; `endpointCount` there is the number of paths.
   - `get_api_spec` returns the full document for a spec id (the `id` from `list_apis`).
3. Analyze:
   - `search_endpoints` does a case-insensitive substring search over path, method,
     summary, description, and operationId.
   - `get_api_stats` aggregates methods, normalized paths (`{param}` -> `{id}`), and versions.
   - `find_inconsistencies` reports mixed authentication scheme types across specs.
   - `compare_schemas` returns a component schema (or two) from every spec that defines it.

Notes:
- Every tool returns text: pretty-printed JSON, or a message starting with `Error:` or
  containing `not found`.
- `$ref`s inside a spec are already inlined.
- `health` returns `ok`; `help` lists the tools.";

/// MCP server wrapper around the spec catalog and tool routers.
#[derive(Clone)]
pub struct OapiMcp {
    tool_router: ToolRouter<Self>,
    catalog: SpecCatalog,
}

impl OapiMcp {
    /// Creates a new server sharing `catalog`.
    #[must_use]
    pub fn new(catalog: SpecCatalog) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_catalog()
            + Self::tool_router_analysis()
            + Self::tool_router_context();
        Self {
            tool_router,
            catalog,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &SpecCatalog {
        &self.catalog
    }

    /// Runs a tool call and wraps its text payload.
    pub(crate) async fn run(&self, call: ToolCall) -> Result<CallToolResult, ErrorData> {
        let payload = self.catalog.execute(call).await;
        Ok(helpers::text_result(payload))
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl OapiMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for OapiMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use oapi_core::loaders::{LoaderConfig, SpecLoader};

    use super::*;

    pub(crate) fn empty_server() -> OapiMcp {
        let loader = SpecLoader::new(LoaderConfig::new()).expect("loader builds");
        OapiMcp::new(SpecCatalog::new(loader))
    }

    #[test]
    fn every_operation_is_routed() {
        let server = empty_server();
        let names: BTreeSet<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        for expected in [
            "health",
            "help",
            "load_specs",
            "list_apis",
            "get_api_spec",
            "search_endpoints",
            "get_api_stats",
            "find_inconsistencies",
            "compare_schemas",
            "get_load_sources",
        ] {
            assert!(names.contains(expected), "missing tool {expected}");
        }
    }

    #[test]
    fn server_info_enables_tools() {
        let info = empty_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.is_some_and(|text| text.contains("search_endpoints")));
    }
}
