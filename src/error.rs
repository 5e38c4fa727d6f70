//! Error types for the MCP server.
//!
//! Every failure while servicing a tool call ends up as an [`McpError`], which the
//! tool registry renders into the `{ "error": { ... } }` result envelope.

use serde_json::{json, Map, Value as JsonValue};

/// MCP server errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum McpError {
    /// Invalid or missing process configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The datasource catalog could not be fetched at startup.
    #[error("datasource discovery failed: {0}")]
    Discovery(String),

    /// A time expression or duration literal could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Missing or invalid tool argument.
    #[error("validation error: {0}")]
    Validation(String),

    /// No datasource of the requested kind is registered.
    #[error("no {kind} datasource configured")]
    NoDatasource {
        /// Canonical kind that was requested
        kind: String,
    },

    /// More than one datasource of the requested kind is registered.
    #[error(
        "multiple {kind} datasources configured ({}); pass 'uid' to choose one",
        .uids.join(", ")
    )]
    AmbiguousDatasource {
        /// Canonical kind that was requested
        kind: String,
        /// Candidate datasource uids
        uids: Vec<String>,
    },

    /// SQL rejected by the guard.
    #[error("query rejected: contains forbidden pattern '{pattern}'")]
    Rejected {
        /// The denylisted pattern that matched
        pattern: String,
    },

    /// Network failure or non-2xx response from the upstream API.
    #[error("{message}")]
    Upstream {
        /// Human-readable message
        message: String,
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Canonical reason phrase for the status
        status_text: Option<String>,
        /// Response body, parsed as JSON when possible
        data: Option<JsonValue>,
    },

    /// Unknown tool requested.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// JSON-RPC protocol error.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for McpError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "upstream request timed out".to_string()
        } else if err.is_connect() {
            format!("failed to connect to upstream: {}", err)
        } else {
            format!("upstream request failed: {}", err)
        };

        let status = err.status();
        McpError::Upstream {
            message,
            status: status.map(|s| s.as_u16()),
            status_text: status
                .and_then(|s| s.canonical_reason())
                .map(str::to_string),
            data: None,
        }
    }
}

impl From<std::io::Error> for McpError {
    fn from(err: std::io::Error) -> Self {
        McpError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for McpError {
    fn from(err: serde_json::Error) -> Self {
        McpError::Protocol(format!("JSON error: {}", err))
    }
}

/// JSON-RPC error codes.
pub mod rpc_codes {
    /// Parse error - Invalid JSON was received.
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid Request - The JSON sent is not a valid Request object.
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found - The method does not exist / is not available.
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params - Invalid method parameter(s).
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error - Internal JSON-RPC error.
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl McpError {
    /// Convert to JSON-RPC error code.
    pub fn rpc_code(&self) -> i32 {
        match self {
            McpError::UnknownTool(_) => rpc_codes::METHOD_NOT_FOUND,
            McpError::Validation(_) | McpError::Parse(_) => rpc_codes::INVALID_PARAMS,
            McpError::Protocol(_) => rpc_codes::INVALID_REQUEST,
            _ => rpc_codes::INTERNAL_ERROR,
        }
    }

    /// Render the error as a tool result payload.
    ///
    /// The shape is `{"error": {"message", "status"?, "statusText"?, "data"?}}`; the
    /// optional fields are only present for upstream HTTP failures.
    pub fn to_payload(&self) -> JsonValue {
        let mut error = Map::new();
        error.insert("message".to_string(), JsonValue::String(self.to_string()));

        if let McpError::Upstream {
            status,
            status_text,
            data,
            ..
        } = self
        {
            if let Some(status) = status {
                error.insert("status".to_string(), json!(status));
            }
            if let Some(text) = status_text {
                error.insert("statusText".to_string(), json!(text));
            }
            if let Some(data) = data {
                error.insert("data".to_string(), data.clone());
            }
        }

        json!({ "error": error })
    }
}

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, McpError>;
