//! Request Builder: normalize raw tool-call arguments into a [`SearchRequest`]
//!
//! Validation here is deliberately lenient: only a missing/non-string `query`
//! is an error. Every other field is type-checked and silently defaulted when
//! it doesn't fit, so e.g. `safesearch: "strict"` becomes the default level 1
//! rather than a rejection. The upstream call always requests `format=json`;
//! the caller-visible output encoding is a formatter concern.

use crate::error::{Result, SearchError};
use crate::types::{SearchArgs, SearchRequest, TimeRange};
use serde_json::Value;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_SAFE_SEARCH: u8 = 1;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const MAX_RESULTS_CAP: usize = 50;

/// Build a normalized request from raw caller arguments. Pure, no I/O.
pub fn build(args: &SearchArgs) -> Result<SearchRequest> {
    let query = match args.query.as_ref().and_then(Value::as_str) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => {
            return Err(SearchError::Validation(
                "query is required and must be a string".to_string(),
            ))
        }
    };

    let language = string_or(&args.language, DEFAULT_LANGUAGE);
    let time_range = args
        .time_range
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<TimeRange>().ok());
    let categories = string_list(&args.categories);
    let engines = string_list(&args.engines);

    let safe_search = args
        .safesearch
        .as_ref()
        .and_then(Value::as_u64)
        .filter(|level| *level <= 2)
        .map(|level| level as u8)
        .unwrap_or(DEFAULT_SAFE_SEARCH);

    let page = args
        .pageno
        .as_ref()
        .and_then(Value::as_u64)
        .filter(|p| *p >= 1)
        .map(|p| p.min(u32::MAX as u64) as u32)
        .unwrap_or(DEFAULT_PAGE);

    let max_results = args
        .max_results
        .as_ref()
        .and_then(Value::as_u64)
        .map(|n| (n as usize).clamp(1, MAX_RESULTS_CAP))
        .unwrap_or(DEFAULT_MAX_RESULTS);

    log::debug!(
        "built search request: query={query:?} language={language} safesearch={safe_search} \
         pageno={page} max_results={max_results}"
    );

    Ok(SearchRequest {
        query,
        language,
        time_range,
        categories,
        engines,
        safe_search,
        page,
        max_results,
    })
}

fn string_or(value: &Option<Value>, default: &str) -> String {
    value
        .as_ref()
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| default.to_string())
}

/// Keep the string elements of an array; any other shape is treated as absent.
fn string_list(value: &Option<Value>) -> Option<Vec<String>> {
    let items = value.as_ref()?.as_array()?;
    let strings: Vec<String> = items
        .iter()
        .filter_map(|item| item.as_str())
        .map(|s| s.to_string())
        .collect();
    if strings.is_empty() {
        None
    } else {
        Some(strings)
    }
}
