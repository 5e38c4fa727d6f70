//! Server configuration.
//!
//! Values come from command-line flags with environment fallbacks (see `main.rs`);
//! the builder turns them into a validated [`Config`].

use std::time::Duration;

use reqwest::Url;

use crate::error::{McpError, Result};

/// Default upstream address.
pub const DEFAULT_URL: &str = "http://localhost:3000";

/// Default upstream request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Validated server configuration.
#[derive(Clone)]
pub struct Config {
    /// Base address of the upstream API
    pub url: Url,
    /// Bearer token sent with every upstream request
    pub token: String,
    /// Restrict the registry to these datasource uids
    pub datasource_uids: Option<Vec<String>>,
    /// Raw JSON object mapping uid to description, parsed leniently at discovery
    pub datasource_descriptions: Option<String>,
    /// Upstream request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url.as_str())
            .field("token", &"<redacted>")
            .field("datasource_uids", &self.datasource_uids)
            .field("datasource_descriptions", &self.datasource_descriptions)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Start building a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    url: Option<String>,
    token: Option<String>,
    token_env: Option<String>,
    datasource_uids: Option<String>,
    datasource_descriptions: Option<String>,
    timeout_ms: Option<u64>,
}

impl ConfigBuilder {
    /// Upstream base address.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Bearer token.
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Name of an environment variable holding the token.
    ///
    /// Only consulted when no token was given directly.
    pub fn token_env(mut self, name: Option<String>) -> Self {
        self.token_env = name;
        self
    }

    /// Comma-separated datasource uid allow-list.
    pub fn datasource_uids(mut self, uids: Option<String>) -> Self {
        self.datasource_uids = uids;
        self
    }

    /// JSON object mapping datasource uid to a description.
    pub fn datasource_descriptions(mut self, descriptions: Option<String>) -> Self {
        self.datasource_descriptions = descriptions;
        self
    }

    /// Upstream request timeout in milliseconds.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<Config> {
        let raw_url = self.url.unwrap_or_else(|| DEFAULT_URL.to_string());
        let url = Url::parse(raw_url.trim())
            .map_err(|e| McpError::Config(format!("invalid upstream URL '{}': {}", raw_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(McpError::Config(format!(
                "upstream URL '{}' cannot be used as a base address",
                raw_url
            )));
        }

        let token = non_empty(self.token)
            .or_else(|| {
                non_empty(self.token_env).and_then(|name| non_empty(std::env::var(name).ok()))
            })
            .ok_or_else(|| {
                McpError::Config(
                    "no API token configured; set GRAFANA_TOKEN or GRAFANA_TOKEN_ENV".to_string(),
                )
            })?;

        let datasource_uids = self.datasource_uids.and_then(|raw| {
            let uids: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if uids.is_empty() {
                None
            } else {
                Some(uids)
            }
        });

        let timeout_ms = self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS);
        if timeout_ms == 0 {
            return Err(McpError::Config(
                "timeout must be greater than 0 ms".to_string(),
            ));
        }

        Ok(Config {
            url,
            token,
            datasource_uids,
            datasource_descriptions: non_empty(self.datasource_descriptions),
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
