//! Datasource listing.
//!
//! Tools: list_datasources

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::convert::parse_args;
use crate::datasource::CanonicalKind;
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::McpSession;
use crate::tools::ToolDef;

/// Tool name.
pub const LIST_DATASOURCES: &str = "list_datasources";

#[derive(Debug, Deserialize)]
struct ListArgs {
    kind: Option<CanonicalKind>,
}

/// Get all datasource tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![ToolDef::new(
        LIST_DATASOURCES,
        "List the datasources this server can query, with uid, name, plugin type, kind \
         (log, metric or sql) and description. Pass a uid from this list to the query \
         tools when more than one datasource of a kind exists. Optionally filter by kind.",
        schema!(object {
            optional: { "kind": ["log", "metric", "sql"] }
        }),
    )]
}

/// Dispatch a datasource tool call.
pub fn dispatch(
    session: &McpSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        LIST_DATASOURCES => {
            let args: ListArgs = parse_args(args)?;
            let datasources: Vec<_> = session
                .registry()
                .iter()
                .filter(|ds| args.kind.map_or(true, |kind| ds.kind == kind))
                .collect();

            Ok(serde_json::json!({
                "count": datasources.len(),
                "datasources": datasources,
            }))
        }
        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
