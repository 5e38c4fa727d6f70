//! Datasource registry.
//!
//! Built once from the upstream catalog before any tool call is served, then shared
//! read-only behind an `Arc`. There is no way to add or remove entries afterwards.

use std::collections::{BTreeMap, HashMap};

use tracing::{info, warn};

use crate::client::GrafanaClient;
use crate::config::Config;
use crate::datasource::{CanonicalKind, CatalogEntry, Datasource};
use crate::error::{McpError, Result};

/// Immutable set of datasources the gateway can query, keyed by uid.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    datasources: BTreeMap<String, Datasource>,
}

impl Registry {
    /// Fetch the catalog and build the registry.
    ///
    /// Any failure to fetch the catalog is a [`McpError::Discovery`]; the server
    /// must not start serving without a registry.
    pub async fn discover(client: &GrafanaClient, config: &Config) -> Result<Self> {
        let entries = client
            .list_datasources()
            .await
            .map_err(|e| McpError::Discovery(e.to_string()))?;
        let total = entries.len();

        let descriptions = parse_descriptions(config.datasource_descriptions.as_deref());
        let registry =
            Self::from_catalog(entries, &descriptions, config.datasource_uids.as_deref());

        info!(
            discovered = total,
            registered = registry.len(),
            "datasource discovery complete"
        );
        for ds in registry.iter() {
            info!(uid = %ds.uid, name = %ds.name, kind = %ds.kind, "registered datasource");
        }

        Ok(registry)
    }

    /// Build a registry from catalog entries.
    ///
    /// Entries with unsupported plugin types are dropped. When `allow_list` is given,
    /// only those uids are kept; listed uids missing from the catalog are ignored.
    pub fn from_catalog(
        entries: Vec<CatalogEntry>,
        descriptions: &HashMap<String, String>,
        allow_list: Option<&[String]>,
    ) -> Self {
        let datasources = entries
            .into_iter()
            .filter(|entry| allow_list.map_or(true, |allowed| allowed.contains(&entry.uid)))
            .filter_map(|entry| {
                let description = descriptions.get(&entry.uid).cloned();
                Datasource::from_entry(entry, description)
            })
            .map(|ds| (ds.uid.clone(), ds))
            .collect();

        Self { datasources }
    }

    /// Look up a datasource by uid.
    pub fn get(&self, uid: &str) -> Option<&Datasource> {
        self.datasources.get(uid)
    }

    /// All datasources, ordered by uid.
    pub fn iter(&self) -> impl Iterator<Item = &Datasource> {
        self.datasources.values()
    }

    /// Datasources of one kind, ordered by uid.
    pub fn of_kind(&self, kind: CanonicalKind) -> impl Iterator<Item = &Datasource> {
        self.iter().filter(move |ds| ds.kind == kind)
    }

    /// Number of registered datasources.
    pub fn len(&self) -> usize {
        self.datasources.len()
    }

    /// Whether no datasource was registered.
    pub fn is_empty(&self) -> bool {
        self.datasources.is_empty()
    }

    /// Pick the datasource uid for a call.
    ///
    /// An explicitly provided uid is returned as is, without checking membership.
    /// Otherwise the single datasource of `kind` is chosen; zero or several
    /// candidates are errors.
    pub fn resolve(&self, kind: CanonicalKind, provided: Option<&str>) -> Result<String> {
        if let Some(uid) = provided {
            return Ok(uid.to_string());
        }

        let mut candidates = self.of_kind(kind);
        match (candidates.next(), candidates.next()) {
            (None, _) => Err(McpError::NoDatasource {
                kind: kind.to_string(),
            }),
            (Some(only), None) => Ok(only.uid.clone()),
            (Some(first), Some(second)) => {
                let uids = [first, second]
                    .into_iter()
                    .chain(candidates)
                    .map(|ds| ds.uid.clone())
                    .collect();
                Err(McpError::AmbiguousDatasource {
                    kind: kind.to_string(),
                    uids,
                })
            }
        }
    }
}

/// Parse the `uid -> description` map.
///
/// Malformed input is logged and treated as if no descriptions were supplied.
pub fn parse_descriptions(raw: Option<&str>) -> HashMap<String, String> {
    let Some(raw) = raw else {
        return HashMap::new();
    };
    match serde_json::from_str::<HashMap<String, String>>(raw) {
        Ok(map) => map,
        Err(e) => {
            warn!(error = %e, "ignoring malformed datasource descriptions");
            HashMap::new()
        }
    }
}
