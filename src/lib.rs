//! # telemetry-mcp
//!
//! MCP (Model Context Protocol) server for querying observability backends through
//! Grafana.
//!
//! The server discovers the Loki, Prometheus and ClickHouse datasources configured in
//! a Grafana instance once at startup and exposes them to AI agents as a handful of
//! tools. Every query is sent through Grafana's HTTP API with a single bearer token;
//! results are the backend's raw JSON.
//!
//! ## Tools
//!
//! - `list_datasources` - discovered datasources, optionally filtered by kind
//! - `query_logs` - LogQL range queries, label names and label values
//! - `query_metrics` - PromQL instant and range queries
//! - `query_sql` - ClickHouse SQL through the unified query endpoint
//! - `health_check` - upstream reachability and token check
//!
//! When exactly one datasource of a kind exists the `uid` argument can be omitted.
//!
//! ## Usage
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "telemetry": {
//!       "command": "/path/to/telemetry-mcp",
//!       "env": {
//!         "GRAFANA_URL": "https://grafana.example.com",
//!         "GRAFANA_TOKEN": "glsa_..."
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use telemetry_mcp::{Config, McpServer, McpSession};
//!
//! # async fn run() -> telemetry_mcp::Result<()> {
//! let config = Config::builder()
//!     .url("http://localhost:3000")
//!     .token(Some("glsa_example".to_string()))
//!     .build()?;
//! let session = McpSession::connect(&config).await?;
//! let server = McpServer::new(session);
//!
//! // Reads from stdin, writes to stdout
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod datasource;
mod error;
mod guard;
mod registry;
mod server;
mod session;
mod time;
mod tools;

pub use client::GrafanaClient;
pub use config::{Config, ConfigBuilder, DEFAULT_TIMEOUT_MS, DEFAULT_URL};
pub use datasource::{CanonicalKind, CatalogEntry, Datasource};
pub use error::{McpError, Result};
pub use guard::check as check_sql;
pub use registry::Registry;
pub use server::{JsonRpcRequest, JsonRpcResponse, McpServer};
pub use session::McpSession;
pub use time::{parse_duration_seconds, parse_time, DurationLiteral, TimeWindow};
pub use tools::{CallToolResult, ToolDef, ToolRegistry};
