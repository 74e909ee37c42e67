//! Process configuration, sourced from the environment
//!
//! An explicit `SEARXNG_URL` always wins; random instance selection only
//! applies when no URL is configured. Neither configured is a fatal startup
//! error. Empty environment values behave the same as unset ones.

use crate::error::{Result, SearchError};
use crate::gateway::{Credentials, ResolvedEndpoint, DEFAULT_TIMEOUT_MS};
use crate::instance::{self, INSTANCE_DIRECTORY_URL};

pub const ENV_URL: &str = "SEARXNG_URL";
pub const ENV_USERNAME: &str = "SEARXNG_USERNAME";
pub const ENV_PASSWORD: &str = "SEARXNG_PASSWORD";
pub const ENV_RANDOM_INSTANCE: &str = "SEARXNG_RANDOM_INSTANCE";
pub const ENV_INSTANCES_URL: &str = "SEARXNG_INSTANCES_URL";
pub const ENV_TIMEOUT_MS: &str = "SEARXNG_TIMEOUT_MS";

#[derive(Debug, Clone)]
pub struct Config {
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub random_instance: bool,
    pub instances_url: String,
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            username: None,
            password: None,
            random_instance: false,
            instances_url: INSTANCE_DIRECTORY_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            url: env_nonempty(ENV_URL),
            username: env_nonempty(ENV_USERNAME),
            password: env_nonempty(ENV_PASSWORD),
            random_instance: env_flag(ENV_RANDOM_INSTANCE),
            instances_url: env_nonempty(ENV_INSTANCES_URL)
                .unwrap_or_else(|| INSTANCE_DIRECTORY_URL.to_string()),
            timeout_ms: env_nonempty(ENV_TIMEOUT_MS)
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Credentials apply only when both halves are configured.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    /// Decide the endpoint for this process run. Called exactly once,
    /// before the front-end starts accepting calls.
    pub async fn resolve_endpoint(&self, client: &reqwest::Client) -> Result<ResolvedEndpoint> {
        let base_url = match &self.url {
            Some(url) => url.clone(),
            None if self.random_instance => instance::resolve(client, &self.instances_url).await?,
            None => {
                return Err(SearchError::Config(format!(
                    "no SearXNG URL configured and random instance selection is disabled; \
                     set {ENV_URL} or {ENV_RANDOM_INSTANCE}=true"
                )))
            }
        };
        ResolvedEndpoint::new(&base_url, self.credentials())
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_flag(key: &str) -> bool {
    env_nonempty(key)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
