//! Tool registry and category definitions.
//!
//! Provides the infrastructure for registering and dispatching MCP tools, and the
//! single place where handler errors are turned into result payloads.

pub mod datasources;
pub mod health;
pub mod logs;
pub mod metrics;
pub mod sql;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, warn};

use crate::error::{McpError, Result};
use crate::session::McpSession;

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "query_logs")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Outcome of one tool call, already reduced to a JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CallToolResult {
    /// Upstream JSON on success, the error envelope on failure
    pub payload: JsonValue,
    /// Whether `payload` describes a failure
    pub is_error: bool,
}

impl CallToolResult {
    /// Wrap the payload in the MCP `content` array.
    pub fn to_content(&self) -> JsonValue {
        serde_json::json!({
            "content": [{
                "type": "text",
                "text": serde_json::to_string(&self.payload).unwrap_or_else(|_| "null".to_string())
            }],
            "isError": self.is_error
        })
    }
}

/// Registry of all available tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create a new registry with all tools registered.
    pub fn new() -> Self {
        let mut tools = Vec::new();

        tools.extend(datasources::tools());
        tools.extend(logs::tools());
        tools.extend(metrics::tools());
        tools.extend(sql::tools());
        tools.extend(health::tools());

        Self { tools }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Run a tool and encode any error into the result payload.
    ///
    /// This never fails: callers always get a well-formed result.
    pub async fn call(
        &self,
        session: &McpSession,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> CallToolResult {
        match self.dispatch(session, name, args).await {
            Ok(payload) => {
                debug!(tool = name, "tool call succeeded");
                CallToolResult {
                    payload,
                    is_error: false,
                }
            }
            Err(err) => {
                warn!(tool = name, error = %err, "tool call failed");
                CallToolResult {
                    payload: err.to_payload(),
                    is_error: true,
                }
            }
        }
    }

    /// Dispatch a tool call to the appropriate handler.
    pub async fn dispatch(
        &self,
        session: &McpSession,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<JsonValue> {
        match name {
            datasources::LIST_DATASOURCES => datasources::dispatch(session, name, args),
            logs::QUERY_LOGS => logs::dispatch(session, name, args).await,
            metrics::QUERY_METRICS => metrics::dispatch(session, name, args).await,
            sql::QUERY_SQL => sql::dispatch(session, name, args).await,
            health::HEALTH_CHECK => health::dispatch(session, name, args).await,
            _ => Err(McpError::UnknownTool(name.to_string())),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut required = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), schema!(@type $req_type));)*
        $(props.insert($opt_name.to_string(), schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only optional properties
    (object {
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let mut props = serde_json::Map::new();
        $(props.insert($opt_name.to_string(), schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": []
        })
    }};

    // Empty object (no parameters)
    (object {}) => {{
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }};

    // Type mappings
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type integer) => { serde_json::json!({"type": "integer"}) };
    (@type duration) => { serde_json::json!({"type": ["string", "integer"]}) };
    (@type [$($variant:literal),+ $(,)?]) => {
        serde_json::json!({"type": "string", "enum": [$($variant),+]})
    };
}
