//! ClickHouse SQL tools.
//!
//! Tools: query_sql
//!
//! SQL goes through the unified `/api/ds/query` endpoint rather than the datasource
//! proxy. The two ClickHouse plugins expect different query objects there, so the
//! body shape is picked from the datasource's plugin type.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::convert::{non_empty, parse_args, require};
use crate::datasource::{CanonicalKind, LEGACY_CLICKHOUSE_TYPE};
use crate::error::{McpError, Result};
use crate::guard;
use crate::schema;
use crate::session::McpSession;
use crate::time::TimeWindow;
use crate::tools::ToolDef;

/// Tool name.
pub const QUERY_SQL: &str = "query_sql";

const DEFAULT_START: &str = "now-1h";
const DEFAULT_END: &str = "now";

const REF_ID: &str = "A";
const INTERVAL_MS: u64 = 1000;
const MAX_DATA_POINTS: u64 = 1000;

/// `format` code for tabular output in the official plugin.
const TABLE_FORMAT: u8 = 1;

#[derive(Debug, Deserialize)]
struct SqlArgs {
    uid: Option<String>,
    sql: Option<String>,
    start: Option<String>,
    end: Option<String>,
}

/// Which query object a datasource expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlShape {
    /// The legacy community ClickHouse plugin
    Legacy,
    /// The official ClickHouse plugin, and anything not known to be legacy
    Native,
}

impl SqlShape {
    /// Pick the shape for a datasource's plugin type.
    ///
    /// `None` (a uid that was not discovered) gets the native shape.
    pub fn for_raw_kind(raw_kind: Option<&str>) -> Self {
        match raw_kind {
            Some(LEGACY_CLICKHOUSE_TYPE) => SqlShape::Legacy,
            _ => SqlShape::Native,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct DatasourceRef {
    uid: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LegacyQuery {
    ref_id: &'static str,
    datasource: DatasourceRef,
    query: String,
    format: &'static str,
    interval_ms: u64,
    max_data_points: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct NativeQuery {
    ref_id: &'static str,
    datasource: DatasourceRef,
    query_type: &'static str,
    editor_type: &'static str,
    format: u8,
    raw_sql: String,
    interval_ms: u64,
    max_data_points: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum SqlQuery {
    Legacy(LegacyQuery),
    Native(NativeQuery),
}

/// Body of `POST /api/ds/query`.
///
/// Both query shapes share this envelope, including `from`/`to` as millisecond strings.
#[derive(Debug, Clone, Serialize)]
struct DsQueryRequest {
    queries: Vec<SqlQuery>,
    from: String,
    to: String,
}

impl DsQueryRequest {
    fn new(shape: SqlShape, datasource: DatasourceRef, sql: String, window: TimeWindow) -> Self {
        let query = match shape {
            SqlShape::Legacy => SqlQuery::Legacy(LegacyQuery {
                ref_id: REF_ID,
                datasource,
                query: sql,
                format: "table",
                interval_ms: INTERVAL_MS,
                max_data_points: MAX_DATA_POINTS,
            }),
            SqlShape::Native => SqlQuery::Native(NativeQuery {
                ref_id: REF_ID,
                datasource,
                query_type: "sql",
                editor_type: "sql",
                format: TABLE_FORMAT,
                raw_sql: sql,
                interval_ms: INTERVAL_MS,
                max_data_points: MAX_DATA_POINTS,
            }),
        };

        let (from, to) = window.millis();
        Self {
            queries: vec![query],
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Get all SQL tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![ToolDef::new(
        QUERY_SQL,
        "Run a read-only SQL query against a ClickHouse datasource and return the raw \
         result frames. [start, end] (default last hour; 'now', 'now-<N><s|m|h|d>' or \
         RFC 3339) fills the time macros. Statements that look destructive are \
         rejected. 'uid' is only needed when several SQL datasources exist.",
        schema!(object {
            required: { "sql": string },
            optional: { "uid": string, "start": string, "end": string }
        }),
    )]
}

/// Dispatch a SQL tool call.
pub async fn dispatch(
    session: &McpSession,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        QUERY_SQL => {
            let args: SqlArgs = parse_args(args)?;
            let sql = require(args.sql, "sql")?;
            guard::check(&sql)?;

            let window = TimeWindow::parse(
                args.start.as_deref().unwrap_or(DEFAULT_START),
                args.end.as_deref().unwrap_or(DEFAULT_END),
                Utc::now(),
            )?;

            let uid = session
                .registry()
                .resolve(CanonicalKind::Sql, non_empty(args.uid).as_deref())?;
            let raw_kind = session.datasource(&uid).map(|ds| ds.raw_kind.clone());
            let shape = SqlShape::for_raw_kind(raw_kind.as_deref());

            let body = DsQueryRequest::new(
                shape,
                DatasourceRef {
                    uid,
                    kind: raw_kind,
                },
                sql,
                window,
            );
            session.client().ds_query(&body).await
        }
        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
