use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::OapiMcp;

/// Payload listing the MCP commands this server offers.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List MCP commands to get context with how this MCP server works."
                    .to_string(),
                "sources_help - Describes how spec sources are configured and loaded."
                    .to_string(),
                "load_specs - Reload every spec from the configured sources."
                    .to_string(),
                "list_apis - Summaries of every loaded spec."
                    .to_string(),
                "get_api_spec - Full document for a spec id (`filename`)."
                    .to_string(),
                "get_load_sources - Provenance of every loaded spec."
                    .to_string(),
                "search_endpoints - Substring search over path, method, summary, description, operationId (`query`)."
                    .to_string(),
                "get_api_stats - Totals, method counts, normalized paths, versions, per-API breakdown."
                    .to_string(),
                "find_inconsistencies - Mixed authentication scheme types across APIs."
                    .to_string(),
                "compare_schemas - A component schema (`schema1`, optional `schema2`) from every API defining it."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl OapiMcp {
    #[tool(description = "List the MCP commands to get context with how this MCP server works.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }

    #[tool(description = "Describes how spec sources are configured and loaded.")]
    async fn sources_help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text(
r"
1.  Sources are configured when the daemon starts, through flags or environment variables:
        1.  `OAPI_REGISTRY_URL` - a registry document listing specs. Either a JSON/YAML array, or an
            object with an `apis` (or `specs`) array. Entries are URL strings or objects with `url`
            and an optional `name` (used as the spec id). Relative URLs resolve against the registry URL.
        2.  `OAPI_SPEC_URLS` - comma-separated URLs of individual specs. The id is the last URL path segment.
        3.  `OAPI_SPECS_DIR` - a folder of `.json`, `.yaml`, or `.yml` specs. The id is the file name.
2.  Sources load one at a time in that order. A source or spec that fails to load is skipped with a
    warning; `load_specs` returns those warnings in its report.
3.  A spec must carry an `openapi` or `swagger` field. Internal `$ref`s are inlined while loading.
4.  When two sources produce the same id, the first one loaded is kept.
5.  `load_specs` replaces the whole catalog; nothing is persisted between restarts.
"
        )]))
    }
}
