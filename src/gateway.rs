//! Search Gateway: the single outbound call to a SearXNG instance
//!
//! One GET per search, no retry. The endpoint is resolved once at startup
//! and shared read-only across calls.

use crate::error::{Result, SearchError};
use crate::types::{SearchRequest, SearchResponse};
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

pub const USER_AGENT: &str = concat!("searxng-mcp/", env!("CARGO_PKG_VERSION"));

/// Default outbound timeout; the source system relied on transport defaults,
/// so this is configurable rather than load-bearing.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Basic-auth credential pair; both halves are required for auth to apply.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A validated instance base address plus optional credentials.
///
/// Process-scoped singleton: resolved once before the front-end accepts
/// calls, then reused for every call until the process exits.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint {
    base_url: String,
    credentials: Option<Credentials>,
}

impl ResolvedEndpoint {
    pub fn new(base_url: &str, credentials: Option<Credentials>) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.to_string(),
            credentials: credentials
                .filter(|c| !c.username.is_empty() && !c.password.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Accept either a bare base URL or one already pointing at /search.
    fn search_url(&self) -> String {
        let mut url = self.base_url.trim().trim_end_matches('/').to_string();
        if !url.ends_with("/search") {
            url.push_str("/search");
        }
        url
    }
}

/// Issues the normalized query against the resolved endpoint.
#[derive(Debug, Clone)]
pub struct SearchGateway {
    client: reqwest::Client,
    endpoint: ResolvedEndpoint,
}

impl SearchGateway {
    pub fn new(endpoint: ResolvedEndpoint) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT_MS)
    }

    pub fn with_timeout(endpoint: ResolvedEndpoint, timeout_ms: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_millis(timeout_ms.clamp(1_000, 60_000)))
            .build()
            .map_err(|e| SearchError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: ResolvedEndpoint) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &ResolvedEndpoint {
        &self.endpoint
    }

    /// One blocking round-trip: send the query, classify failures, parse
    /// the JSON body leniently. `max_results` is intentionally not sent
    /// upstream; truncation is the formatter's job.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let mut outbound = self
            .client
            .get(self.endpoint.search_url())
            .query(&[
                ("q", request.query.as_str()),
                ("format", "json"),
                ("language", request.language.as_str()),
            ])
            .query(&[
                ("safesearch", request.safe_search.to_string()),
                ("pageno", request.page.to_string()),
            ]);

        if let Some(time_range) = request.time_range {
            outbound = outbound.query(&[("time_range", time_range.to_string())]);
        }
        if let Some(categories) = &request.categories {
            outbound = outbound.query(&[("categories", categories.join(","))]);
        }
        if let Some(engines) = &request.engines {
            outbound = outbound.query(&[("engines", engines.join(","))]);
        }
        if let Some(credentials) = &self.endpoint.credentials {
            outbound = outbound.basic_auth(&credentials.username, Some(&credentials.password));
        }

        log::debug!(
            "querying {} for {:?} (page {})",
            self.endpoint.base_url,
            request.query,
            request.page
        );

        let response = outbound.send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(SearchError::Auth);
        }
        if !status.is_success() {
            let body = response.text().await.ok().filter(|b| !b.is_empty());
            return Err(SearchError::Upstream {
                message: format!("search request failed with status {status}"),
                status_code: Some(status.as_u16()),
                response_body: body,
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("failed to decode search response: {e}")))?;

        log::debug!(
            "received {} results ({} reported upstream)",
            parsed.results.len(),
            parsed.number_of_results
        );
        Ok(parsed)
    }
}
