//! Daemon entry point for the OpenAPI catalog MCP server.
//!
//! Loads configuration from the environment, performs the initial spec load,
//! and serves the MCP protocol over stdio and/or streamable HTTP.

mod config;
mod logging;

use oapi_core::loaders::SpecLoader;
use oapi_core::services::SpecCatalog;
use oapi_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing::{info, warn};

use crate::config::OapiConfig;
use crate::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = OapiConfig::from_args()?;
    init_tracing(config.log_json);

    let loader = SpecLoader::new(config.loader_config())?;
    let catalog = SpecCatalog::new(loader);
    let report = catalog.reload().await;
    if report.count == 0 {
        warn!("no specs loaded; tools will return empty results until `load_specs` succeeds");
    } else {
        info!(count = report.count, "initial spec load complete");
    }

    let http_config =
        McpHttpServerConfig::new(config.mcp_http_addr).with_stateful_mode(!config.mcp_stateless);

    match (config.enable_stdio, config.mcp_serve) {
        (true, true) => {
            tokio::select! {
                result = serve_stdio(catalog.clone()) => result,
                result = serve_streamable_http(catalog, http_config) => result,
            }
        }
        (true, false) => serve_stdio(catalog).await,
        (false, _) => serve_streamable_http(catalog, http_config).await,
    }
}
