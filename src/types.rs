//! Core types for the SearXNG proxy

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Raw arguments of a `searxngsearch` call.
///
/// Every field deserializes as untyped JSON so that a present-but-wrong-typed
/// value never fails at the protocol layer; [`crate::request::build`] applies
/// the type-check-then-default policy. The `schemars` overrides keep the
/// advertised tool schema honest about the types callers should send.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// The search query
    #[schemars(with = "String")]
    pub query: Option<Value>,
    /// Language code for the results (default: "en")
    #[schemars(with = "Option<String>")]
    #[serde(default)]
    pub language: Option<Value>,
    /// Restrict results to a time window: "day", "week", "month" or "year"
    #[schemars(with = "Option<String>")]
    #[serde(default)]
    pub time_range: Option<Value>,
    /// Result categories to search (e.g. ["general", "news"])
    #[schemars(with = "Option<Vec<String>>")]
    #[serde(default)]
    pub categories: Option<Value>,
    /// Engines to query (e.g. ["duckduckgo", "brave"])
    #[schemars(with = "Option<Vec<String>>")]
    #[serde(default)]
    pub engines: Option<Value>,
    /// Safe search level: 0 (off), 1 (moderate) or 2 (strict); default 1
    #[schemars(with = "Option<u8>")]
    #[serde(default)]
    pub safesearch: Option<Value>,
    /// Result page to request from the instance (default 1)
    #[schemars(with = "Option<u32>")]
    #[serde(default)]
    pub pageno: Option<Value>,
    /// Maximum number of results to include in the output, 1-50 (default 10)
    #[schemars(with = "Option<u32>")]
    #[serde(default)]
    pub max_results: Option<Value>,
}

/// Time window accepted by the SearXNG `time_range` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRange::Day => write!(f, "day"),
            TimeRange::Week => write!(f, "week"),
            TimeRange::Month => write!(f, "month"),
            TimeRange::Year => write!(f, "year"),
        }
    }
}

impl FromStr for TimeRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            "month" => Ok(TimeRange::Month),
            "year" => Ok(TimeRange::Year),
            _ => Err(()),
        }
    }
}

/// Output encoding for a formatted response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable Markdown summary
    #[default]
    Markdown,
    /// Pretty-printed echo of the upstream JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

/// A fully normalized search request.
///
/// Invariant: `query` is non-empty and every defaulted field is populated by
/// the time the gateway sees this; `None` here means "omit from the outbound
/// query string", never "not yet decided".
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    pub language: String,
    pub time_range: Option<TimeRange>,
    pub categories: Option<Vec<String>>,
    pub engines: Option<Vec<String>>,
    pub safe_search: u8,
    pub page: u32,
    pub max_results: usize,
}

/// One search hit in the instance's JSON response.
///
/// Field names follow the SearXNG JSON format (`content` is the snippet,
/// `publishedDate` is camelCase upstream).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_url: Option<String>,
    #[serde(
        default,
        rename = "publishedDate",
        skip_serializing_if = "Option::is_none"
    )]
    pub published_date: Option<String>,
}

/// The instance's JSON response, read-only to this crate.
///
/// Collections deserialize leniently: absent or malformed fields become
/// empty rather than failing the whole call, since the formatter only needs
/// to iterate them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub number_of_results: u64,
    #[serde(default, deserialize_with = "lenient_hits")]
    pub results: Vec<SearchHit>,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub answers: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub corrections: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub suggestions: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub unresponsive_engines: Vec<String>,
}

/// Keep only the plain strings of an array; anything else becomes empty.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Decode each array element as a hit, dropping elements that don't fit.
fn lenient_hits<'de, D>(deserializer: D) -> Result<Vec<SearchHit>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Accept integer or float counts; anything else is 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f as u64)))
        .unwrap_or(0))
}
