//! Integration tests for the MCP server against a mock Grafana.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::{json, Map, Value as JsonValue};
use telemetry_mcp::{
    CanonicalKind, Config, JsonRpcRequest, McpError, McpServer, McpSession, ToolRegistry,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TOKEN: &str = "test-token";

/// Start a mock Grafana serving the given datasource catalog.
async fn mock_grafana(catalog: JsonValue) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/datasources"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(catalog))
        .mount(&server)
        .await;
    server
}

fn config_for(server: &MockServer) -> Config {
    Config::builder()
        .url(server.uri())
        .token(Some(TOKEN.to_string()))
        .build()
        .expect("valid config")
}

async fn session_for(server: &MockServer) -> McpSession {
    McpSession::connect(&config_for(server))
        .await
        .expect("discovery failed")
}

/// One Loki datasource "A" and one Prometheus datasource "B".
fn basic_catalog() -> JsonValue {
    json!([
        {"uid": "A", "name": "Logs", "type": "loki"},
        {"uid": "B", "name": "Metrics", "type": "prometheus"},
    ])
}

fn args_map(args: JsonValue) -> Map<String, JsonValue> {
    match args {
        JsonValue::Object(m) => m,
        _ => Map::new(),
    }
}

/// Helper to dispatch a tool call.
async fn call_tool(session: &McpSession, name: &str, args: JsonValue) -> JsonValue {
    ToolRegistry::new()
        .dispatch(session, name, args_map(args))
        .await
        .unwrap_or_else(|e| panic!("Tool {} failed: {}", name, e))
}

/// Helper to dispatch a tool call and expect an error.
async fn call_tool_err(session: &McpSession, name: &str, args: JsonValue) -> McpError {
    match ToolRegistry::new()
        .dispatch(session, name, args_map(args))
        .await
    {
        Ok(v) => panic!("Expected tool {} to fail, got {}", name, v),
        Err(e) => e,
    }
}

/// Requests the mock received on `request_path`.
async fn requests_to(server: &MockServer, request_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|r| r.url.path() == request_path)
        .collect()
}

fn query_params(request: &Request) -> HashMap<String, String> {
    request.url.query_pairs().into_owned().collect()
}

fn param_i64(params: &HashMap<String, String>, name: &str) -> i64 {
    params
        .get(name)
        .unwrap_or_else(|| panic!("missing query param {}", name))
        .parse()
        .unwrap_or_else(|_| panic!("query param {} is not an integer", name))
}

// =============================================================================
// Discovery
// =============================================================================

#[tokio::test]
async fn test_discovery_keeps_supported_types() {
    let server = mock_grafana(json!([
        {"uid": "A", "name": "Logs", "type": "loki"},
        {"uid": "B", "name": "Metrics", "type": "prometheus"},
        {"uid": "C", "name": "ClickHouse", "type": "grafana-clickhouse-datasource"},
        {"uid": "D", "name": "Old ClickHouse", "type": "vertamedia-clickhouse-datasource"},
        {"uid": "E", "name": "Elastic", "type": "elasticsearch"},
    ]))
    .await;
    let session = session_for(&server).await;

    let registry = session.registry();
    assert_eq!(registry.len(), 4);
    assert!(registry.get("E").is_none());
    assert_eq!(registry.get("A").unwrap().kind, CanonicalKind::Log);
    assert_eq!(registry.get("B").unwrap().kind, CanonicalKind::Metric);
    assert_eq!(registry.get("C").unwrap().kind, CanonicalKind::Sql);
    assert_eq!(registry.get("D").unwrap().kind, CanonicalKind::Sql);
}

#[tokio::test]
async fn test_discovery_allow_list_and_descriptions() {
    let server = mock_grafana(basic_catalog()).await;
    let config = Config::builder()
        .url(server.uri())
        .token(Some(TOKEN.to_string()))
        .datasource_uids(Some("B,missing".to_string()))
        .datasource_descriptions(Some(r#"{"B": "Cluster metrics"}"#.to_string()))
        .build()
        .unwrap();
    let session = McpSession::connect(&config).await.unwrap();

    assert_eq!(session.registry().len(), 1);
    let ds = session.registry().get("B").unwrap();
    assert_eq!(ds.description.as_deref(), Some("Cluster metrics"));
}

#[tokio::test]
async fn test_discovery_tolerates_bad_descriptions() {
    let server = mock_grafana(basic_catalog()).await;
    let config = Config::builder()
        .url(server.uri())
        .token(Some(TOKEN.to_string()))
        .datasource_descriptions(Some("not json".to_string()))
        .build()
        .unwrap();
    let session = McpSession::connect(&config).await.unwrap();

    assert_eq!(session.registry().len(), 2);
    assert!(session.registry().iter().all(|ds| ds.description.is_none()));
}

#[tokio::test]
async fn test_discovery_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/datasources"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid API key"})),
        )
        .mount(&server)
        .await;

    let err = McpSession::connect(&config_for(&server)).await.unwrap_err();
    match err {
        McpError::Discovery(msg) => assert!(msg.contains("401")),
        other => panic!("expected discovery error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_discovery_unreachable_upstream() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let err = McpSession::connect(&config).await.unwrap_err();
    assert!(matches!(err, McpError::Discovery(_)));
}

// =============================================================================
// list_datasources
// =============================================================================

#[tokio::test]
async fn test_list_datasources() {
    let server = mock_grafana(basic_catalog()).await;
    let session = session_for(&server).await;

    let result = call_tool(&session, "list_datasources", json!({})).await;
    assert_eq!(result["count"], json!(2));
    let list = result["datasources"].as_array().unwrap();
    assert_eq!(list[0]["uid"], json!("A"));
    assert_eq!(list[0]["type"], json!("loki"));
    assert_eq!(list[0]["kind"], json!("log"));
    assert_eq!(list[1]["kind"], json!("metric"));
}

#[tokio::test]
async fn test_list_datasources_by_kind() {
    let server = mock_grafana(basic_catalog()).await;
    let session = session_for(&server).await;

    let result = call_tool(&session, "list_datasources", json!({"kind": "metric"})).await;
    assert_eq!(result["count"], json!(1));
    assert_eq!(result["datasources"][0]["uid"], json!("B"));

    let err = call_tool_err(&session, "list_datasources", json!({"kind": "traces"})).await;
    assert!(matches!(err, McpError::Validation(_)));
}

// =============================================================================
// query_logs
// =============================================================================

#[tokio::test]
async fn test_logs_labels_resolves_single_datasource() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/A/loki/api/v1/labels"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "data": ["app", "level"]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let result = call_tool(&session, "query_logs", json!({"action": "labels"})).await;
    assert_eq!(result, json!({"status": "success", "data": ["app", "level"]}));

    let requests = requests_to(&server, "/api/datasources/proxy/uid/A/loki/api/v1/labels").await;
    assert_eq!(requests.len(), 1);
    let params = query_params(&requests[0]);
    let start = param_i64(&params, "start");
    let end = param_i64(&params, "end");
    assert_eq!(end - start, 3_600 * 1_000_000_000);
}

#[tokio::test]
async fn test_logs_query_params() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/A/loki/api/v1/query_range"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": {}})),
        )
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    call_tool(
        &session,
        "query_logs",
        json!({
            "query": "{app=\"api\"} |= \"error\"",
            "start": "2024-01-01T00:00:00Z",
            "end": "2024-01-01T00:05:00Z",
            "direction": "forward"
        }),
    )
    .await;

    let requests =
        requests_to(&server, "/api/datasources/proxy/uid/A/loki/api/v1/query_range").await;
    let params = query_params(&requests[0]);
    assert_eq!(params["query"], "{app=\"api\"} |= \"error\"");
    assert_eq!(params["limit"], "100");
    assert_eq!(params["direction"], "forward");
    assert_eq!(params["start"], "1704067200000000000");
    assert_eq!(params["end"], "1704067500000000000");
}

#[tokio::test]
async fn test_logs_label_values() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/A/loki/api/v1/label/level/values"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "data": ["info", "error"]})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let result = call_tool(
        &session,
        "query_logs",
        json!({"action": "label_values", "label": "level", "limit": 5}),
    )
    .await;
    assert_eq!(result["data"], json!(["info", "error"]));
}

#[tokio::test]
async fn test_logs_validation() {
    let server = mock_grafana(basic_catalog()).await;
    let session = session_for(&server).await;

    let err = call_tool_err(&session, "query_logs", json!({"action": "query"})).await;
    assert!(matches!(err, McpError::Validation(_)));

    let err = call_tool_err(&session, "query_logs", json!({"action": "label_values"})).await;
    assert!(matches!(err, McpError::Validation(_)));

    let err = call_tool_err(&session, "query_logs", json!({"action": "tail"})).await;
    assert!(matches!(err, McpError::Validation(_)));
}

#[tokio::test]
async fn test_logs_ambiguous_datasource() {
    let server = mock_grafana(json!([
        {"uid": "L1", "name": "Logs EU", "type": "loki"},
        {"uid": "L2", "name": "Logs US", "type": "loki"},
    ]))
    .await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/L2/loki/api/v1/labels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let err = call_tool_err(&session, "query_logs", json!({"action": "labels"})).await;
    match err {
        McpError::AmbiguousDatasource { kind, uids } => {
            assert_eq!(kind, "log");
            assert_eq!(uids, vec!["L1", "L2"]);
        }
        other => panic!("expected ambiguity, got {:?}", other),
    }

    // An explicit uid disambiguates
    call_tool(&session, "query_logs", json!({"action": "labels", "uid": "L2"})).await;
}

// =============================================================================
// query_metrics
// =============================================================================

#[tokio::test]
async fn test_metrics_range_window_and_step() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/B/api/v1/query_range"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "success", "data": {"resultType": "matrix"}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let result = call_tool(
        &session,
        "query_metrics",
        json!({
            "query": "sum(rate(http_requests_total[5m]))",
            "mode": "range",
            "start": "now-1h",
            "end": "now",
            "step": "30s"
        }),
    )
    .await;
    assert_eq!(result["data"]["resultType"], json!("matrix"));

    let requests = requests_to(&server, "/api/datasources/proxy/uid/B/api/v1/query_range").await;
    let params = query_params(&requests[0]);
    assert_eq!(params["query"], "sum(rate(http_requests_total[5m]))");
    assert_eq!(params["step"], "30");
    assert_eq!(param_i64(&params, "end") - param_i64(&params, "start"), 3_600);
}

#[tokio::test]
async fn test_metrics_instant_with_explicit_uid() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/other/api/v1/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    call_tool(
        &session,
        "query_metrics",
        json!({"query": "up", "uid": "other", "time": "2024-01-01T00:00:00Z"}),
    )
    .await;

    let requests = requests_to(&server, "/api/datasources/proxy/uid/other/api/v1/query").await;
    let params = query_params(&requests[0]);
    assert_eq!(params["time"], "1704067200");
}

#[tokio::test]
async fn test_metrics_requires_query() {
    let server = mock_grafana(basic_catalog()).await;
    let session = session_for(&server).await;

    let err = call_tool_err(&session, "query_metrics", json!({"mode": "instant"})).await;
    assert!(matches!(err, McpError::Validation(_)));

    let err = call_tool_err(&session, "query_metrics", json!({"query": "up", "mode": "x"})).await;
    assert!(matches!(err, McpError::Validation(_)));
}

// =============================================================================
// query_sql
// =============================================================================

async fn sql_server(kind: &str) -> MockServer {
    let server = mock_grafana(json!([{"uid": "CH", "name": "ClickHouse", "type": kind}])).await;
    Mock::given(method("POST"))
        .and(path("/api/ds/query"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": {"A": {"frames": []}}})),
        )
        .mount(&server)
        .await;
    server
}

async fn sql_body(server: &MockServer) -> JsonValue {
    let requests = requests_to(server, "/api/ds/query").await;
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).expect("JSON body")
}

#[tokio::test]
async fn test_sql_native_body() {
    let server = sql_server("grafana-clickhouse-datasource").await;
    let session = session_for(&server).await;

    let result = call_tool(
        &session,
        "query_sql",
        json!({"sql": "SELECT count(*) FROM blocks WHERE slot > 100"}),
    )
    .await;
    assert_eq!(result, json!({"results": {"A": {"frames": []}}}));

    let body = sql_body(&server).await;
    let from: i64 = body["from"].as_str().unwrap().parse().unwrap();
    let to: i64 = body["to"].as_str().unwrap().parse().unwrap();
    assert_eq!(to - from, 3_600_000);

    let q = &body["queries"][0];
    assert_eq!(q["datasource"]["uid"], json!("CH"));
    assert_eq!(q["datasource"]["type"], json!("grafana-clickhouse-datasource"));
    assert_eq!(q["queryType"], json!("sql"));
    assert_eq!(q["editorType"], json!("sql"));
    assert_eq!(q["format"], json!(1));
    assert_eq!(q["rawSql"], json!("SELECT count(*) FROM blocks WHERE slot > 100"));
    assert_eq!(q["intervalMs"], json!(1000));
    assert_eq!(q["maxDataPoints"], json!(1000));
}

#[tokio::test]
async fn test_sql_legacy_body() {
    let server = sql_server("vertamedia-clickhouse-datasource").await;
    let session = session_for(&server).await;

    call_tool(
        &session,
        "query_sql",
        json!({
            "sql": "SELECT 1",
            "start": "2024-01-01T00:00:00Z",
            "end": "2024-01-01T01:00:00Z"
        }),
    )
    .await;

    let body = sql_body(&server).await;
    assert_eq!(body["from"], json!("1704067200000"));
    assert_eq!(body["to"], json!("1704070800000"));
    let q = &body["queries"][0];
    assert_eq!(q["query"], json!("SELECT 1"));
    assert_eq!(q["format"], json!("table"));
    assert_eq!(q["intervalMs"], json!(1000));
    assert_eq!(q["maxDataPoints"], json!(1000));
    assert!(q.get("rawSql").is_none());
}

#[tokio::test]
async fn test_sql_guard_blocks_before_dispatch() {
    let server = mock_grafana(json!([
        {"uid": "CH", "name": "ClickHouse", "type": "grafana-clickhouse-datasource"}
    ]))
    .await;
    Mock::given(method("POST"))
        .and(path("/api/ds/query"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let err = call_tool_err(
        &session,
        "query_sql",
        json!({"sql": "SELECT * FROM t\"; DROP TABLE users"}),
    )
    .await;
    match err {
        McpError::Rejected { pattern } => assert_eq!(pattern, "drop table"),
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_sql_without_datasource() {
    let server = mock_grafana(basic_catalog()).await;
    let session = session_for(&server).await;

    let err = call_tool_err(&session, "query_sql", json!({"sql": "SELECT 1"})).await;
    match err {
        McpError::NoDatasource { kind } => assert_eq!(kind, "sql"),
        other => panic!("expected missing datasource, got {:?}", other),
    }

    let err = call_tool_err(&session, "query_sql", json!({})).await;
    assert!(matches!(err, McpError::Validation(_)));
}

// =============================================================================
// health_check
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/org"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Main Org."})))
        .expect(1)
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let result = call_tool(&session, "health_check", json!({})).await;
    assert_eq!(result["status"], json!("ok"));
    assert_eq!(result["organization"]["name"], json!("Main Org."));
    assert_eq!(result["datasource_count"], json!(2));
    assert_eq!(result["datasources"][0]["uid"], json!("A"));
}

#[tokio::test]
async fn test_health_check_rejected_token() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/org"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid API key"})),
        )
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let result = ToolRegistry::new()
        .call(&session, "health_check", Map::new())
        .await;
    assert!(result.is_error);
    let error = &result.payload["error"];
    assert_eq!(error["status"], json!(401));
    assert_eq!(error["statusText"], json!("Unauthorized"));
    assert_eq!(error["data"], json!({"message": "invalid API key"}));
}

// =============================================================================
// Error envelope
// =============================================================================

#[tokio::test]
async fn test_upstream_error_envelope() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/B/api/v1/query"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": "error",
            "errorType": "bad_data",
            "error": "parse error at char 4"
        })))
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let result = ToolRegistry::new()
        .call(&session, "query_metrics", args_map(json!({"query": "up{"})))
        .await;
    assert!(result.is_error);
    let error = &result.payload["error"];
    assert_eq!(error["status"], json!(400));
    assert_eq!(error["statusText"], json!("Bad Request"));
    assert_eq!(error["data"]["errorType"], json!("bad_data"));
    assert!(error["message"].as_str().unwrap().contains("400"));
}

#[tokio::test]
async fn test_upstream_timeout_envelope() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/A/loki/api/v1/labels"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&server)
        .await;
    let config = Config::builder()
        .url(server.uri())
        .token(Some(TOKEN.to_string()))
        .timeout_ms(300)
        .build()
        .unwrap();
    let session = McpSession::connect(&config).await.unwrap();

    let result = ToolRegistry::new()
        .call(&session, "query_logs", args_map(json!({"action": "labels"})))
        .await;
    assert!(result.is_error);
    let error = &result.payload["error"];
    assert_eq!(error["message"], json!("upstream request timed out"));
    assert!(error.get("status").is_none());
}

#[tokio::test]
async fn test_non_json_upstream_body_is_kept_as_text() {
    let server = mock_grafana(basic_catalog()).await;
    Mock::given(method("GET"))
        .and(path("/api/datasources/proxy/uid/A/loki/api/v1/labels"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    let session = session_for(&server).await;

    let result = ToolRegistry::new()
        .call(&session, "query_logs", args_map(json!({"action": "labels"})))
        .await;
    assert!(result.is_error);
    assert_eq!(result.payload["error"]["status"], json!(502));
    assert_eq!(result.payload["error"]["data"], json!("bad gateway"));
}

#[tokio::test]
async fn test_local_errors_become_envelopes() {
    let server = mock_grafana(basic_catalog()).await;
    let session = session_for(&server).await;
    let registry = ToolRegistry::new();

    let result = registry
        .call(&session, "query_sql", args_map(json!({"sql": "SELECT 1"})))
        .await;
    assert!(result.is_error);
    assert!(result.payload["error"]["message"]
        .as_str()
        .unwrap()
        .contains("sql"));
    assert!(result.payload["error"].get("status").is_none());

    let result = registry.call(&session, "no_such_tool", Map::new()).await;
    assert!(result.is_error);
    assert!(result.payload["error"]["message"]
        .as_str()
        .unwrap()
        .contains("no_such_tool"));
}

#[tokio::test]
async fn test_tools_call_over_json_rpc() {
    let server = mock_grafana(basic_catalog()).await;
    let session = session_for(&server).await;
    let mcp = McpServer::new(session);

    let response = mcp
        .handle_request(JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(7)),
            method: "tools/call".to_string(),
            params: Some(json!({"name": "query_metrics", "arguments": {}})),
        })
        .await
        .expect("response");

    assert!(response.error.is_none());
    let result = response.result.unwrap();
    assert_eq!(result["isError"], json!(true));
    let text = result["content"][0]["text"].as_str().unwrap();
    let payload: JsonValue = serde_json::from_str(text).unwrap();
    assert!(payload["error"]["message"]
        .as_str()
        .unwrap()
        .contains("query"));

    let notification = mcp
        .handle_request(JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        })
        .await;
    assert!(notification.is_none());
}

// =============================================================================
// Tool Registry
// =============================================================================

#[test]
fn test_tool_count() {
    let registry = ToolRegistry::new();
    let names: Vec<&str> = registry.tools().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "list_datasources",
            "query_logs",
            "query_metrics",
            "query_sql",
            "health_check"
        ]
    );
}

#[test]
fn test_all_tools_have_required_fields() {
    let registry = ToolRegistry::new();
    for tool in registry.tools() {
        assert!(!tool.name.is_empty(), "Tool has empty name");
        assert!(!tool.description.is_empty(), "Tool {} has empty description", tool.name);
        assert!(tool.input_schema.is_object(), "Tool {} has invalid schema", tool.name);
        assert_eq!(tool.input_schema["type"], json!("object"));
    }
}

#[test]
fn test_schemas_enumerate_modes() {
    let registry = ToolRegistry::new();
    let schema = |name: &str| {
        registry
            .tools()
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.input_schema.clone())
            .unwrap()
    };

    let logs = schema("query_logs");
    assert_eq!(
        logs["properties"]["action"]["enum"],
        json!(["query", "labels", "label_values"])
    );

    let metrics = schema("query_metrics");
    assert_eq!(metrics["properties"]["mode"]["enum"], json!(["instant", "range"]));
    assert_eq!(metrics["required"], json!(["query"]));

    let sql = schema("query_sql");
    assert_eq!(sql["required"], json!(["sql"]));
}
