//! Authenticated HTTP client for the upstream Grafana API.
//!
//! One client is built at startup and shared by every tool call. It carries the
//! bearer token and JSON headers as defaults and a fixed request timeout.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::config::Config;
use crate::datasource::CatalogEntry;
use crate::error::{McpError, Result};

/// Shared upstream client.
#[derive(Debug, Clone)]
pub struct GrafanaClient {
    http: Client,
    base: Url,
}

impl GrafanaClient {
    /// Build the client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token)).map_err(|_| {
            McpError::Config("API token contains characters not valid in an HTTP header".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| McpError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base: config.url.clone(),
        })
    }

    /// Base address requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Fetch the full datasource catalog (`GET /api/datasources`).
    pub async fn list_datasources(&self) -> Result<Vec<CatalogEntry>> {
        let url = self.endpoint(["api", "datasources"])?;
        let body = self.get(url, &[]).await?;
        serde_json::from_value(body).map_err(|e| McpError::Upstream {
            message: format!("unexpected datasource catalog format: {}", e),
            status: None,
            status_text: None,
            data: None,
        })
    }

    /// Current organization (`GET /api/org`); cheap and requires a valid token.
    pub async fn current_org(&self) -> Result<JsonValue> {
        let url = self.endpoint(["api", "org"])?;
        self.get(url, &[]).await
    }

    /// `GET` through the per-datasource reverse proxy.
    ///
    /// `path` is appended below `/api/datasources/proxy/uid/{uid}`; each element is a
    /// single path segment and is percent-encoded as needed.
    pub async fn proxy_get(
        &self,
        uid: &str,
        path: &[&str],
        query: &[(&str, String)],
    ) -> Result<JsonValue> {
        let segments = ["api", "datasources", "proxy", "uid", uid]
            .into_iter()
            .chain(path.iter().copied());
        let url = self.endpoint(segments)?;
        self.get(url, query).await
    }

    /// `POST /api/ds/query` with the given body.
    pub async fn ds_query<B: Serialize + ?Sized>(&self, body: &B) -> Result<JsonValue> {
        let url = self.endpoint(["api", "ds", "query"])?;
        debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        read_response(response).await
    }

    async fn get(&self, url: Url, query: &[(&str, String)]) -> Result<JsonValue> {
        debug!(%url, ?query, "GET");
        let response = self.http.get(url).query(query).send().await?;
        read_response(response).await
    }

    fn endpoint<'a, I>(&self, segments: I) -> Result<Url>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| McpError::Config(format!("'{}' cannot be used as a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn a response into its JSON body, or an upstream error for non-2xx statuses.
///
/// Bodies that are not JSON are returned as a JSON string.
async fn read_response(response: Response) -> Result<JsonValue> {
    let status = response.status();
    let text = response.text().await?;

    let body = if text.trim().is_empty() {
        JsonValue::Null
    } else {
        match serde_json::from_str::<JsonValue>(&text) {
            Ok(value) => value,
            Err(_) => JsonValue::String(text),
        }
    };

    if !status.is_success() {
        return Err(McpError::Upstream {
            message: format!("upstream returned {}", status),
            status: Some(status.as_u16()),
            status_text: status.canonical_reason().map(str::to_string),
            data: Some(body),
        });
    }

    Ok(body)
}
