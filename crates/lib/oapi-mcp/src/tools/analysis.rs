use oapi_core::dispatch::ToolCall;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::OapiMcp;

/// Parameters for searching endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchEndpointsParams {
    /// Case-insensitive text matched against path, method, summary, description, and operationId. Required.
    pub query: Option<String>,
}

/// Parameters for comparing component schemas across specs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompareSchemasParams {
    /// Schema name under `components.schemas`. Required.
    pub schema1: Option<String>,
    /// Optional second schema name to fetch alongside the first.
    pub schema2: Option<String>,
}

#[tool_router(router = tool_router_analysis, vis = "pub")]
impl OapiMcp {
    #[tool(description = "Search endpoints across all loaded APIs by substring (case-insensitive).")]
    async fn search_endpoints(
        &self,
        Parameters(params): Parameters<SearchEndpointsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::SearchEndpoints {
            query: params.query,
        })
        .await
    }

    #[tool(description = "Aggregate statistics: totals, method counts, normalized common paths, versions, and a per-API breakdown.")]
    async fn get_api_stats(&self) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::GetApiStats).await
    }

    #[tool(description = "Find inconsistencies across APIs, such as mixed authentication scheme types.")]
    async fn find_inconsistencies(&self) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::FindInconsistencies).await
    }

    #[tool(description = "Return the named component schema(s) from every API that defines them, for side-by-side comparison.")]
    async fn compare_schemas(
        &self,
        Parameters(params): Parameters<CompareSchemasParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::CompareSchemas {
            schema1: params.schema1,
            schema2: params.schema2,
        })
        .await
    }
}
