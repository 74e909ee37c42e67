//! Result Formatter: render an upstream response as Markdown or pretty JSON
//!
//! Truncation to `max_results` happens here, never upstream: the gateway
//! always asks for the full first page and the header reports the instance's
//! own result count even when fewer entries are shown.

use crate::error::Result;
use crate::types::{OutputFormat, SearchResponse};

pub fn format_response(
    response: &SearchResponse,
    max_results: usize,
    mode: OutputFormat,
) -> Result<String> {
    match mode {
        OutputFormat::Markdown => Ok(to_markdown(response, max_results)),
        OutputFormat::Json => to_pretty_json(response, max_results),
    }
}

/// Pretty-print the response with `results` truncated; every other field is
/// echoed unmodified.
fn to_pretty_json(response: &SearchResponse, max_results: usize) -> Result<String> {
    let mut truncated = response.clone();
    truncated.results.truncate(max_results);
    Ok(serde_json::to_string_pretty(&truncated)?)
}

/// Deterministic section order; a section is omitted entirely when its
/// source collection is empty.
fn to_markdown(response: &SearchResponse, max_results: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Search Results for: {}\n\n", response.query));
    out.push_str(&format!("Found {} results\n", response.number_of_results));

    push_bullets(&mut out, "Answers", &response.answers);
    push_bullets(&mut out, "Suggestions", &response.suggestions);
    push_bullets(&mut out, "Did you mean?", &response.corrections);

    if !response.results.is_empty() {
        out.push_str("\n## Results\n");
        for (index, hit) in response.results.iter().take(max_results).enumerate() {
            out.push_str(&format!("\n### {}. {}\n", index + 1, hit.title));
            out.push_str(&format!("URL: {}\n", hit.url));
            if let Some(engine) = &hit.engine {
                out.push_str(&format!("Engine: {engine}\n"));
            }
            if let Some(category) = &hit.category {
                out.push_str(&format!("Category: {category}\n"));
            }
            if let Some(published) = &hit.published_date {
                out.push_str(&format!("Published: {published}\n"));
            }
            if let Some(snippet) = &hit.content {
                out.push_str(&format!("\n{snippet}\n"));
            }
        }
    }

    if !response.unresponsive_engines.is_empty() {
        out.push_str(&format!(
            "\n## Unresponsive Engines\n\n{}\n",
            response.unresponsive_engines.join(", ")
        ));
    }

    out
}

fn push_bullets(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("\n## {heading}\n\n"));
    for item in items {
        out.push_str(&format!("- {item}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SearchHit;
    use serde_json::json;

    fn sample_response(result_count: usize) -> SearchResponse {
        SearchResponse {
            query: "rust language".to_string(),
            number_of_results: 128,
            results: (1..=result_count)
                .map(|i| SearchHit {
                    title: format!("Result {i}"),
                    url: format!("https://example.com/{i}"),
                    content: Some(format!("Snippet {i}")),
                    engine: Some("duckduckgo".to_string()),
                    ..Default::default()
                })
                .collect(),
            answers: vec!["Rust is a systems language".to_string()],
            corrections: vec!["rust languages".to_string()],
            suggestions: vec!["rust book".to_string()],
            unresponsive_engines: vec!["google".to_string(), "bing".to_string()],
        }
    }

    #[test]
    fn markdown_reports_upstream_count_but_truncates_results() {
        let markdown = to_markdown(&sample_response(8), 5);
        assert!(markdown.contains("Found 128 results"));
        assert_eq!(markdown.matches("\n### ").count(), 5);
        assert!(markdown.contains("### 5. Result 5"));
        assert!(!markdown.contains("Result 6"));
    }

    #[test]
    fn markdown_sections_appear_in_order() {
        let markdown = to_markdown(&sample_response(2), 10);
        let answers = markdown.find("## Answers").unwrap();
        let suggestions = markdown.find("## Suggestions").unwrap();
        let corrections = markdown.find("## Did you mean?").unwrap();
        let results = markdown.find("## Results").unwrap();
        let unresponsive = markdown.find("## Unresponsive Engines").unwrap();
        assert!(answers < suggestions);
        assert!(suggestions < corrections);
        assert!(corrections < results);
        assert!(results < unresponsive);
        assert!(markdown.contains("google, bing"));
    }

    #[test]
    fn markdown_omits_empty_sections() {
        let response = SearchResponse {
            query: "quiet".to_string(),
            number_of_results: 0,
            ..Default::default()
        };
        let markdown = to_markdown(&response, 10);
        assert!(markdown.starts_with("# Search Results for: quiet"));
        assert!(markdown.contains("Found 0 results"));
        assert!(!markdown.contains("## Answers"));
        assert!(!markdown.contains("## Results"));
        assert!(!markdown.contains("## Unresponsive Engines"));
    }

    #[test]
    fn markdown_skips_absent_hit_fields() {
        let response = SearchResponse {
            query: "q".to_string(),
            number_of_results: 1,
            results: vec![SearchHit {
                title: "Bare".to_string(),
                url: "https://example.com".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let markdown = to_markdown(&response, 10);
        assert!(markdown.contains("### 1. Bare"));
        assert!(markdown.contains("URL: https://example.com"));
        assert!(!markdown.contains("Engine:"));
        assert!(!markdown.contains("Category:"));
        assert!(!markdown.contains("Published:"));
    }

    #[test]
    fn markdown_includes_optional_hit_fields_when_present() {
        let response = SearchResponse {
            query: "q".to_string(),
            number_of_results: 1,
            results: vec![SearchHit {
                title: "Full".to_string(),
                url: "https://example.com".to_string(),
                content: Some("The snippet".to_string()),
                engine: Some("brave".to_string()),
                category: Some("news".to_string()),
                published_date: Some("2024-01-15".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let markdown = to_markdown(&response, 10);
        assert!(markdown.contains("Engine: brave\n"));
        assert!(markdown.contains("Category: news\n"));
        assert!(markdown.contains("Published: 2024-01-15\n"));
        assert!(markdown.contains("\nThe snippet\n"));
    }

    #[test]
    fn json_mode_truncates_only_the_results_array() {
        let rendered = format_response(&sample_response(5), 2, OutputFormat::Json).unwrap();
        let echoed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(echoed["results"].as_array().unwrap().len(), 2);
        assert_eq!(echoed["number_of_results"], json!(128));
        assert_eq!(echoed["answers"], json!(["Rust is a systems language"]));
        assert_eq!(echoed["suggestions"], json!(["rust book"]));
        assert_eq!(echoed["unresponsive_engines"], json!(["google", "bing"]));
    }

    #[test]
    fn formatting_is_idempotent() {
        let response = sample_response(8);
        for mode in [OutputFormat::Markdown, OutputFormat::Json] {
            let first = format_response(&response, 5, mode).unwrap();
            let second = format_response(&response, 5, mode).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn formatted_count_never_exceeds_max_results() {
        for max in [1usize, 3, 10, 50] {
            let markdown = to_markdown(&sample_response(8), max);
            assert!(markdown.matches("\n### ").count() <= max.min(8));
        }
    }
}
