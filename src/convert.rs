//! Conversion of raw tool arguments into typed inputs.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::error::{McpError, Result};

/// Deserialize a tool's argument object into its typed input.
///
/// Type mismatches and unknown enum values become validation errors.
pub fn parse_args<T: DeserializeOwned>(args: Map<String, JsonValue>) -> Result<T> {
    serde_json::from_value(JsonValue::Object(args))
        .map_err(|e| McpError::Validation(format!("invalid arguments: {}", e)))
}

/// Treat blank strings the same as an omitted argument.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Require a non-blank string argument.
pub fn require(value: Option<String>, name: &str) -> Result<String> {
    non_empty(value).ok_or_else(|| McpError::Validation(format!("'{}' is required", name)))
}
