//! Tool Front-End: MCP stdio server advertising `searxngsearch`
//!
//! The endpoint is resolved before this server starts (startup barrier), so
//! every call shares one read-only gateway. Per-call failures become
//! error-flagged tool results; only startup resolution may kill the process.
//! Unknown tool names never reach this module; the protocol router rejects
//! them with a method-not-found condition.

use crate::error::SearchError;
use crate::gateway::SearchGateway;
use crate::types::{OutputFormat, SearchArgs};
use rmcp::{
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
    ErrorData as McpError, ServiceExt,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct SearxngServer {
    tool_router: ToolRouter<Self>,
    gateway: Arc<SearchGateway>,
    output: OutputFormat,
}

#[tool_router]
impl SearxngServer {
    pub fn new(gateway: SearchGateway, output: OutputFormat) -> Self {
        Self {
            tool_router: Self::tool_router(),
            gateway: Arc::new(gateway),
            output,
        }
    }

    #[tool(
        name = "searxngsearch",
        description = "Search the web through a SearXNG instance. Returns formatted results \
                       including titles, URLs and snippets."
    )]
    async fn searxng_search(
        &self,
        params: Parameters<Option<SearchArgs>>,
    ) -> Result<CallToolResult, McpError> {
        let args = params.0.unwrap_or_default();
        match crate::run_search(&self.gateway, &args, self.output).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(error) => Ok(failure(&error)),
        }
    }
}

/// Convert any per-call error into an error-flagged result rather than a
/// protocol failure, so the caller always gets a readable message back.
fn failure(error: &SearchError) -> CallToolResult {
    log::warn!("searxngsearch call failed: {error}");
    CallToolResult::error(vec![Content::text(error.to_string())])
}

#[tool_handler]
impl rmcp::ServerHandler for SearxngServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Forwards searxngsearch calls to a SearXNG metasearch instance and relays \
                 the response as Markdown or pretty-printed JSON."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Serve on stdio until the client closes the stream.
pub async fn serve_stdio(gateway: SearchGateway, output: OutputFormat) -> Result<(), McpError> {
    let service = SearxngServer::new(gateway, output);
    let running = service
        .serve(stdio())
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    running
        .waiting()
        .await
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(())
}
