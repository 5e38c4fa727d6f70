//! Prometheus metric tools.
//!
//! Tools: query_metrics

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::convert::{non_empty, parse_args, require};
use crate::datasource::CanonicalKind;
use crate::error::{McpError, Result};
use crate::schema;
use crate::session::McpSession;
use crate::time::{nanos_to_seconds, parse_time_at, DurationLiteral, TimeWindow};
use crate::tools::ToolDef;

/// Tool name.
pub const QUERY_METRICS: &str = "query_metrics";

const DEFAULT_TIME: &str = "now";
const DEFAULT_START: &str = "now-1h";
const DEFAULT_END: &str = "now";
const DEFAULT_STEP: &str = "30s";

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricMode {
    #[default]
    Instant,
    Range,
}

#[derive(Debug, Deserialize)]
struct MetricArgs {
    mode: Option<MetricMode>,
    uid: Option<String>,
    query: Option<String>,
    time: Option<String>,
    start: Option<String>,
    end: Option<String>,
    step: Option<DurationLiteral>,
}

/// A validated PromQL request; all times in whole seconds.
#[derive(Debug, Clone, PartialEq)]
enum MetricRequest {
    Instant {
        expr: String,
        time: i64,
    },
    Range {
        expr: String,
        start: i64,
        end: i64,
        step: u64,
    },
}

impl MetricArgs {
    fn into_request(self) -> Result<(Option<String>, MetricRequest)> {
        let now = Utc::now();
        let expr = require(self.query, "query")?;

        let request = match self.mode.unwrap_or_default() {
            MetricMode::Instant => {
                let time = parse_time_at(self.time.as_deref().unwrap_or(DEFAULT_TIME), now)?;
                MetricRequest::Instant {
                    expr,
                    time: nanos_to_seconds(time),
                }
            }
            MetricMode::Range => {
                let window = TimeWindow::parse(
                    self.start.as_deref().unwrap_or(DEFAULT_START),
                    self.end.as_deref().unwrap_or(DEFAULT_END),
                    now,
                )?;
                let step = self
                    .step
                    .unwrap_or_else(|| DEFAULT_STEP.into())
                    .seconds()?;
                if step == 0 {
                    return Err(McpError::Validation(
                        "'step' must be at least 1 second".to_string(),
                    ));
                }
                let (start, end) = window.seconds();
                MetricRequest::Range {
                    expr,
                    start,
                    end,
                    step,
                }
            }
        };

        Ok((non_empty(self.uid), request))
    }
}

/// Get all metric tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![ToolDef::new(
        QUERY_METRICS,
        "Run a PromQL query against a Prometheus datasource. mode 'instant' (default) \
         evaluates 'query' at 'time' (default 'now'). mode 'range' evaluates it over \
         [start, end] (default last hour) every 'step' (default '30s'; seconds or \
         <N><s|m|h|d>). Times accept 'now', 'now-<N><s|m|h|d>' or RFC 3339. 'uid' is \
         only needed when several metric datasources exist.",
        schema!(object {
            required: { "query": string },
            optional: {
                "mode": ["instant", "range"],
                "uid": string,
                "time": string,
                "start": string,
                "end": string,
                "step": duration
            }
        }),
    )]
}

/// Dispatch a metric tool call.
pub async fn dispatch(
    session: &McpSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        QUERY_METRICS => {
            let args: MetricArgs = parse_args(args)?;
            let (uid, request) = args.into_request()?;
            let uid = session
                .registry()
                .resolve(CanonicalKind::Metric, uid.as_deref())?;
            send(session, &uid, request).await
        }
        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}

async fn send(session: &McpSession, uid: &str, request: MetricRequest) -> Result<JsonValue> {
    match request {
        MetricRequest::Instant { expr, time } => {
            let params = [("query", expr), ("time", time.to_string())];
            session
                .client()
                .proxy_get(uid, &["api", "v1", "query"], &params)
                .await
        }
        MetricRequest::Range {
            expr,
            start,
            end,
            step,
        } => {
            let params = [
                ("query", expr),
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("step", step.to_string()),
            ];
            session
                .client()
                .proxy_get(uid, &["api", "v1", "query_range"], &params)
                .await
        }
    }
}
