//! Loki log tools.
//!
//! Tools: query_logs
//!
//! Requests go through the datasource proxy to Loki's HTTP API; timestamps are
//! sent in nanoseconds.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::convert::{non_empty, parse_args, require};
use crate::datasource::CanonicalKind;
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::McpSession;
use crate::time::TimeWindow;
use crate::tools::ToolDef;

/// Tool name.
pub const QUERY_LOGS: &str = "query_logs";

/// Lines returned by a log query when no limit is given.
pub const DEFAULT_LIMIT: u64 = 100;

const DEFAULT_START: &str = "now-1h";
const DEFAULT_END: &str = "now";

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LogAction {
    #[default]
    Query,
    Labels,
    LabelValues,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Direction {
    Backward,
    Forward,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Backward => "backward",
            Direction::Forward => "forward",
        }
    }
}

#[derive(Debug, Deserialize)]
struct LogArgs {
    action: Option<LogAction>,
    uid: Option<String>,
    query: Option<String>,
    label: Option<String>,
    start: Option<String>,
    end: Option<String>,
    limit: Option<u64>,
    direction: Option<Direction>,
}

/// A validated Loki request.
#[derive(Debug, Clone, PartialEq)]
enum LogRequest {
    Query {
        expr: String,
        limit: u64,
        direction: Option<&'static str>,
    },
    Labels,
    LabelValues {
        label: String,
        selector: Option<String>,
    },
}

impl LogArgs {
    fn into_request(self) -> Result<(Option<String>, TimeWindow, LogRequest)> {
        let window = TimeWindow::parse(
            self.start.as_deref().unwrap_or(DEFAULT_START),
            self.end.as_deref().unwrap_or(DEFAULT_END),
            Utc::now(),
        )?;

        let request = match self.action.unwrap_or_default() {
            LogAction::Query => {
                let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
                if limit == 0 {
                    return Err(McpError::Validation(
                        "'limit' must be at least 1".to_string(),
                    ));
                }
                LogRequest::Query {
                    expr: require(self.query, "query")?,
                    limit,
                    direction: self.direction.map(Direction::as_str),
                }
            }
            LogAction::Labels => LogRequest::Labels,
            LogAction::LabelValues => LogRequest::LabelValues {
                label: require(self.label, "label")?,
                selector: non_empty(self.query),
            },
        };

        Ok((non_empty(self.uid), window, request))
    }
}

/// Get all log tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![ToolDef::new(
        QUERY_LOGS,
        "Query a Loki datasource. action 'query' (default) runs a LogQL query over \
         [start, end] and needs 'query'; 'limit' caps returned lines (default 100). \
         action 'labels' lists label names seen in the range. action 'label_values' \
         lists values of 'label', optionally restricted by a stream selector in 'query'. \
         start/end accept 'now', 'now-<N><s|m|h|d>' or RFC 3339 and default to the last \
         hour. 'uid' is only needed when several log datasources exist.",
        schema!(object {
            optional: {
                "action": ["query", "labels", "label_values"],
                "uid": string,
                "query": string,
                "label": string,
                "start": string,
                "end": string,
                "limit": integer,
                "direction": ["backward", "forward"]
            }
        }),
    )]
}

/// Dispatch a log tool call.
pub async fn dispatch(
    session: &McpSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        QUERY_LOGS => {
            let args: LogArgs = parse_args(args)?;
            let (uid, window, request) = args.into_request()?;
            let uid = session
                .registry()
                .resolve(CanonicalKind::Log, uid.as_deref())?;
            send(session, &uid, window, request).await
        }
        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}

async fn send(
    session: &McpSession,
    uid: &str,
    window: TimeWindow,
    request: LogRequest,
) -> Result<JsonValue> {
    let mut params = vec![
        ("start", window.start_ns.to_string()),
        ("end", window.end_ns.to_string()),
    ];

    match request {
        LogRequest::Query {
            expr,
            limit,
            direction,
        } => {
            params.push(("query", expr));
            params.push(("limit", limit.to_string()));
            if let Some(direction) = direction {
                params.push(("direction", direction.to_string()));
            }
            session
                .client()
                .proxy_get(uid, &["loki", "api", "v1", "query_range"], &params)
                .await
        }
        LogRequest::Labels => {
            session
                .client()
                .proxy_get(uid, &["loki", "api", "v1", "labels"], &params)
                .await
        }
        LogRequest::LabelValues { label, selector } => {
            if let Some(selector) = selector {
                params.push(("query", selector));
            }
            session
                .client()
                .proxy_get(
                    uid,
                    &["loki", "api", "v1", "label", label.as_str(), "values"],
                    &params,
                )
                .await
        }
    }
}
