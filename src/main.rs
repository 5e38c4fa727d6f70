//! MCP server for Grafana-hosted telemetry backends.
//!
//! Run with `GRAFANA_URL=... GRAFANA_TOKEN=... telemetry-mcp`.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use telemetry_mcp::{Config, McpServer, McpSession, DEFAULT_TIMEOUT_MS, DEFAULT_URL};

/// MCP server for Loki, Prometheus and ClickHouse datasources behind Grafana.
///
/// Discovers datasources at startup and exposes query tools for AI agents.
/// Communicates via JSON-RPC 2.0 over stdin/stdout.
#[derive(Parser)]
#[command(name = "telemetry-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the Grafana instance.
    #[arg(long, env = "GRAFANA_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Grafana API or service account token.
    #[arg(long, env = "GRAFANA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Name of an environment variable that holds the token.
    /// Used when --token is not given.
    #[arg(long, env = "GRAFANA_TOKEN_ENV", value_name = "VAR")]
    token_env: Option<String>,

    /// Comma-separated datasource uids to expose. Defaults to all supported ones.
    #[arg(long, env = "GRAFANA_DATASOURCE_UIDS", value_name = "UIDS")]
    datasource_uids: Option<String>,

    /// JSON object mapping datasource uid to a description shown to agents.
    #[arg(long, env = "GRAFANA_DATASOURCE_DESCRIPTIONS", value_name = "JSON")]
    datasource_descriptions: Option<String>,

    /// Upstream request timeout in milliseconds.
    #[arg(long, env = "GRAFANA_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Enable debug logging to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the protocol
    let default_directive = if args.verbose {
        "telemetry_mcp=debug"
    } else {
        "telemetry_mcp=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::builder()
        .url(args.url)
        .token(args.token)
        .token_env(args.token_env)
        .datasource_uids(args.datasource_uids)
        .datasource_descriptions(args.datasource_descriptions)
        .timeout_ms(args.timeout_ms)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    info!(url = %config.url, "discovering datasources");

    let session = match McpSession::connect(&config).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if session.registry().is_empty() {
        info!("no supported datasources found; query tools will report missing datasources");
    }

    let server = McpServer::new(session);

    if let Err(e) = server.run().await {
        eprintln!("Error: Server error: {}", e);
        std::process::exit(1);
    }
}
