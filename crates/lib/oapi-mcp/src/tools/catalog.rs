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

/// Parameters for fetching a raw spec.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetApiSpecParams {
    /// Spec id as reported by `list_apis` (usually the file or registry entry name). Required.
    pub filename: Option<String>,
}

#[tool_router(router = tool_router_catalog, vis = "pub")]
impl OapiMcp {
    #[tool(description = "Reload every spec from the configured sources. Returns the load report with the spec count.")]
    async fn load_specs(&self) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::LoadSpecs).await
    }

    #[tool(description = "List loaded APIs with id, title, version, description, and path count.")]
    async fn list_apis(&self) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::ListApis).await
    }

    #[tool(description = "Fetch the full OpenAPI document for a spec id.")]
    async fn get_api_spec(
        &self,
        Parameters(params): Parameters<GetApiSpecParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::GetApiSpec {
            filename: params.filename,
        })
        .await
    }

    #[tool(description = "List where each loaded spec came from (registry, url, or folder).")]
    async fn get_load_sources(&self) -> Result<CallToolResult, ErrorData> {
        self.run(ToolCall::GetLoadSources).await
    }
}
