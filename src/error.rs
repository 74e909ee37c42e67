//! Error types for the SearXNG proxy

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T, E = SearchError> = std::result::Result<T, E>;

/// Fixed remediation message returned on HTTP 401 from the instance,
/// regardless of whatever body the instance sent along.
pub const AUTH_FAILED_MESSAGE: &str =
    "Authentication failed: please check your SearXNG username and password";

/// Everything that can go wrong between a tool call and its response
#[derive(Error, Debug, Clone)]
pub enum SearchError {
    /// Instance directory resolution failed; fatal at startup, never retried
    #[error("Instance resolution failed: {0}")]
    Resolution(String),

    /// Caller input rejected before any network I/O
    #[error("{0}")]
    Validation(String),

    /// The instance rejected the configured credentials
    #[error("{AUTH_FAILED_MESSAGE}")]
    Auth,

    /// The search call failed in transport or with a non-auth error status
    #[error("SearXNG request failed: {message}")]
    Upstream {
        message: String,
        status_code: Option<u16>,
        response_body: Option<String>,
    },

    /// Process or endpoint configuration problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// The upstream body could not be decoded
    #[error("Parsing error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        if error.status().map(|s| s.as_u16()) == Some(401) {
            return SearchError::Auth;
        }
        let message = if error.is_timeout() {
            format!("request timed out: {error}")
        } else {
            error.to_string()
        };
        SearchError::Upstream {
            message,
            status_code: error.status().map(|s| s.as_u16()),
            response_body: None,
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        SearchError::Parse(format!("JSON handling failed: {error}"))
    }
}

impl From<url::ParseError> for SearchError {
    fn from(error: url::ParseError) -> Self {
        SearchError::Config(format!("Invalid URL: {error}"))
    }
}
