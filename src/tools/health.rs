//! Upstream health check.
//!
//! Tools: health_check

use serde_json::{Map, Value as JsonValue};

use crate::error::{McpError, Result};
use crate::schema;
use crate::session::McpSession;
use crate::tools::ToolDef;

/// Tool name.
pub const HEALTH_CHECK: &str = "health_check";

/// Get all health tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![ToolDef::new(
        HEALTH_CHECK,
        "Check that Grafana is reachable and the API token is accepted, and report \
         which datasources were discovered at startup.",
        schema!(object {}),
    )]
}

/// Dispatch a health tool call.
pub async fn dispatch(
    session: &McpSession,
    name: &str,
    _args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        HEALTH_CHECK => {
            let organization = session.client().current_org().await?;

            let datasources: Vec<JsonValue> = session
                .registry()
                .iter()
                .map(|ds| {
                    serde_json::json!({
                        "uid": ds.uid,
                        "name": ds.name,
                        "kind": ds.kind,
                    })
                })
                .collect();

            Ok(serde_json::json!({
                "status": "ok",
                "upstream": session.client().base_url().as_str(),
                "organization": organization,
                "datasource_count": datasources.len(),
                "datasources": datasources,
            }))
        }
        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
