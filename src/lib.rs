//! # searxng-mcp
//!
//! A thin proxy between MCP clients and a SearXNG metasearch instance. The
//! crate exposes a single tool, `searxngsearch`, which normalizes the
//! caller's arguments, forwards them to the instance's JSON search API, and
//! relays the response as a Markdown summary or a pretty-printed JSON echo.
//!
//! When no instance URL is configured, a random public instance can be
//! picked once at startup from the searx.space directory and reused for the
//! lifetime of the process.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use searxng_mcp::{gateway::{ResolvedEndpoint, SearchGateway}, run_search, OutputFormat, SearchArgs};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = ResolvedEndpoint::new("https://searx.example.org", None)?;
//!     let gateway = SearchGateway::new(endpoint)?;
//!
//!     let args: SearchArgs = serde_json::from_value(serde_json::json!({
//!         "query": "rust programming language",
//!         "max_results": 5
//!     }))?;
//!
//!     let text = run_search(&gateway, &args, OutputFormat::Markdown).await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod instance;
pub mod request;
pub mod server;
pub mod types;

// Re-export common types
pub use error::{Result, SearchError};
pub use types::{OutputFormat, SearchArgs, SearchRequest, SearchResponse};

use gateway::SearchGateway;

/// One complete call: normalize the raw arguments, query the instance,
/// format the response.
///
/// This is the pipeline both the MCP front-end and the CLI run per call.
/// Validation failures abort before any network I/O.
pub async fn run_search(
    gateway: &SearchGateway,
    args: &SearchArgs,
    output: OutputFormat,
) -> Result<String> {
    let request = request::build(args)?;
    let response = gateway.search(&request).await?;
    format::format_response(&response, request.max_results, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateway::ResolvedEndpoint;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(value: serde_json::Value) -> SearchArgs {
        serde_json::from_value(value).unwrap()
    }

    async fn gateway_for(mock: &MockServer) -> SearchGateway {
        let endpoint = ResolvedEndpoint::new(&mock.uri(), None).unwrap();
        SearchGateway::new(endpoint).unwrap()
    }

    #[tokio::test]
    async fn pipeline_runs_end_to_end() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust"))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "rust",
                "number_of_results": 2,
                "results": [
                    {"title": "A", "url": "https://a.example"},
                    {"title": "B", "url": "https://b.example"}
                ]
            })))
            .mount(&mock)
            .await;

        let gateway = gateway_for(&mock).await;
        let text = run_search(&gateway, &args(json!({ "query": "rust" })), OutputFormat::Markdown)
            .await
            .unwrap();
        assert!(text.contains("Found 2 results"));
        assert!(text.contains("### 2. B"));
    }

    #[tokio::test]
    async fn validation_failure_makes_no_network_call() {
        let mock = MockServer::start().await;
        let gateway = gateway_for(&mock).await;
        let err = run_search(&gateway, &args(json!({})), OutputFormat::Markdown)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
        assert!(mock.received_requests().await.unwrap().is_empty());
    }
}
