//! Instance Resolver: pick a random public SearXNG instance
//!
//! Used only when no explicit endpoint is configured. The resolver fetches
//! the public instance directory once, filters out hidden and non-clearnet
//! instances, and picks one uniformly at random. The result is held for the
//! whole process lifetime; a failure here is fatal to startup.

use crate::error::{Result, SearchError};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::collections::HashMap;

/// Directory of public instances, as served by searx.space.
pub const INSTANCE_DIRECTORY_URL: &str = "https://searx.space/data/instances.json";

#[derive(Debug, Default, Deserialize)]
pub struct InstanceDirectory {
    #[serde(default)]
    pub instances: HashMap<String, InstanceMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstanceMeta {
    #[serde(default)]
    pub comments: Option<Vec<String>>,
    #[serde(default)]
    pub network_type: Option<String>,
}

impl InstanceMeta {
    /// An instance qualifies unless a comment tag marks it "hidden"/"onion"
    /// (case-sensitive substring match) or it is off the clear web.
    fn is_eligible(&self) -> bool {
        let comments_ok = match &self.comments {
            None => true,
            Some(comments) => !comments
                .iter()
                .any(|c| c.contains("hidden") || c.contains("onion")),
        };
        let network_ok = self
            .network_type
            .as_deref()
            .map_or(true, |network| network == "normal");
        comments_ok && network_ok
    }
}

/// URLs of all qualifying instances, in stable order.
pub fn eligible_instances(directory: &InstanceDirectory) -> Vec<&str> {
    let mut urls: Vec<&str> = directory
        .instances
        .iter()
        .filter(|(_, meta)| meta.is_eligible())
        .map(|(url, _)| url.as_str())
        .collect();
    urls.sort_unstable();
    urls
}

/// Fetch the directory and select one qualifying instance uniformly at
/// random. Any failure maps to [`SearchError::Resolution`]: no retry, no
/// fallback default.
pub async fn resolve(client: &reqwest::Client, directory_url: &str) -> Result<String> {
    log::info!("resolving a random SearXNG instance from {directory_url}");

    let response = client
        .get(directory_url)
        .send()
        .await
        .map_err(|e| SearchError::Resolution(format!("instance directory fetch failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Resolution(format!(
            "instance directory fetch failed with status {status}"
        )));
    }

    let directory: InstanceDirectory = response
        .json()
        .await
        .map_err(|e| SearchError::Resolution(format!("instance directory parse failed: {e}")))?;

    let url = pick_random(&directory)?;
    log::info!("resolved instance {url}");
    Ok(url)
}

fn pick_random(directory: &InstanceDirectory) -> Result<String> {
    let candidates = eligible_instances(directory);
    candidates
        .choose(&mut rand::thread_rng())
        .map(|url| url.to_string())
        .ok_or_else(|| {
            SearchError::Resolution("no eligible instances in the directory".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn directory(value: serde_json::Value) -> InstanceDirectory {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn instances_without_metadata_are_eligible() {
        let dir = directory(json!({
            "instances": { "https://searx.example.org/": {} }
        }));
        assert_eq!(eligible_instances(&dir), vec!["https://searx.example.org/"]);
    }

    #[test]
    fn hidden_and_onion_comments_disqualify() {
        let dir = directory(json!({
            "instances": {
                "https://a.example/": { "comments": ["hidden"] },
                "https://b.example/": { "comments": ["runs as onion service"] },
                "https://c.example/": { "comments": ["fast", "reliable"] }
            }
        }));
        assert_eq!(eligible_instances(&dir), vec!["https://c.example/"]);
    }

    #[test]
    fn comment_match_is_substring_and_case_sensitive() {
        let dir = directory(json!({
            "instances": {
                "https://a.example/": { "comments": ["semi-hidden instance"] },
                "https://b.example/": { "comments": ["Hidden"] }
            }
        }));
        // "semi-hidden" contains "hidden"; "Hidden" does not (case-sensitive).
        assert_eq!(eligible_instances(&dir), vec!["https://b.example/"]);
    }

    #[test]
    fn non_normal_network_types_disqualify() {
        let dir = directory(json!({
            "instances": {
                "https://tor.example/": { "network_type": "tor" },
                "https://clear.example/": { "network_type": "normal" },
                "https://untagged.example/": {}
            }
        }));
        assert_eq!(
            eligible_instances(&dir),
            vec!["https://clear.example/", "https://untagged.example/"]
        );
    }

    #[test]
    fn empty_comment_list_is_eligible() {
        let dir = directory(json!({
            "instances": { "https://a.example/": { "comments": [] } }
        }));
        assert_eq!(eligible_instances(&dir), vec!["https://a.example/"]);
    }

    #[test]
    fn picking_from_an_empty_directory_fails() {
        let dir = directory(json!({ "instances": {} }));
        assert!(matches!(
            pick_random(&dir),
            Err(SearchError::Resolution(_))
        ));
    }

    #[test]
    fn picking_from_all_disqualified_fails() {
        let dir = directory(json!({
            "instances": { "https://a.example/": { "comments": ["hidden"] } }
        }));
        assert!(matches!(
            pick_random(&dir),
            Err(SearchError::Resolution(_))
        ));
    }

    #[test]
    fn pick_returns_the_only_candidate() {
        let dir = directory(json!({
            "instances": {
                "https://only.example/": {},
                "https://no.example/": { "network_type": "tor" }
            }
        }));
        assert_eq!(pick_random(&dir).unwrap(), "https://only.example/");
    }

    #[test]
    fn real_directory_shape_parses() {
        // Trimmed-down copy of the searx.space document structure; unknown
        // per-instance fields must be ignored.
        let dir = directory(json!({
            "metadata": { "timestamp": 1700000000 },
            "instances": {
                "https://searx.tiekoetter.com/": {
                    "comments": [],
                    "network_type": "normal",
                    "uptime": { "uptimeDay": 100 },
                    "version": "2024.1.1"
                }
            }
        }));
        assert_eq!(
            eligible_instances(&dir),
            vec!["https://searx.tiekoetter.com/"]
        );
    }
}
