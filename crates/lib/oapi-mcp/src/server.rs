//! MCP server runners for oapi-mcp.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use oapi_core::services::SpecCatalog;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tracing::info;

use crate::OapiMcp;

const SSE_KEEP_ALIVE: Duration = Duration::from_secs(15);
const SSE_RETRY: Duration = Duration::from_secs(3);

/// Configuration for the MCP streamable HTTP server.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }
}

/// Serves the MCP server over stdio.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio(
    catalog: SpecCatalog,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = OapiMcp::new(catalog);
    let (stdin, stdout) = stdio();
    let running = serve_server(service, (stdin, stdout)).await?;
    let _ = running.waiting().await?;
    Ok(())
}

/// Serves the MCP server using streamable HTTP transport.
///
/// Every session shares the same catalog, so a reload from one client is
/// visible to all of them.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http(
    catalog: SpecCatalog,
    config: McpHttpServerConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service: StreamableHttpService<OapiMcp, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(OapiMcp::new(catalog.clone())),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                sse_keep_alive: Some(SSE_KEEP_ALIVE),
                sse_retry: Some(SSE_RETRY),
                stateful_mode: config.stateful_mode,
                ..Default::default()
            },
        );

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", service);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "oapi-mcp streamable HTTP listening");
    axum::serve(listener, app).await?;
    Ok(())
}
