//! MCP session state.
//!
//! Holds the shared upstream client and the frozen datasource registry. A session
//! is created once at startup and read by every tool call.

use std::sync::Arc;

use crate::client::GrafanaClient;
use crate::config::Config;
use crate::datasource::Datasource;
use crate::error::Result;
use crate::registry::Registry;

/// Per-process context shared by all tool calls.
#[derive(Debug, Clone)]
pub struct McpSession {
    client: GrafanaClient,
    registry: Arc<Registry>,
}

impl McpSession {
    /// Create a session from an already built client and registry.
    pub fn new(client: GrafanaClient, registry: Registry) -> Self {
        Self {
            client,
            registry: Arc::new(registry),
        }
    }

    /// Build the client and run datasource discovery.
    ///
    /// Fails if the catalog cannot be fetched; callers should treat that as fatal.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = GrafanaClient::new(config)?;
        let registry = Registry::discover(&client, config).await?;
        Ok(Self::new(client, registry))
    }

    /// The shared upstream client.
    pub fn client(&self) -> &GrafanaClient {
        &self.client
    }

    /// The datasource registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up a registered datasource.
    pub fn datasource(&self, uid: &str) -> Option<&Datasource> {
        self.registry.get(uid)
    }
}
