//! Datasource records and plugin type normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw plugin id of the legacy ClickHouse plugin, which speaks a different query schema.
pub const LEGACY_CLICKHOUSE_TYPE: &str = "vertamedia-clickhouse-datasource";

/// Raw plugin id of the official ClickHouse plugin.
pub const CLICKHOUSE_TYPE: &str = "grafana-clickhouse-datasource";

/// Known plugin ids and the kind of query each one serves.
const KNOWN_TYPES: &[(&str, CanonicalKind)] = &[
    ("loki", CanonicalKind::Log),
    ("prometheus", CanonicalKind::Metric),
    (CLICKHOUSE_TYPE, CanonicalKind::Sql),
    (LEGACY_CLICKHOUSE_TYPE, CanonicalKind::Sql),
];

/// Backend-agnostic classification of a datasource's query capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalKind {
    /// Log queries (LogQL)
    Log,
    /// Metric queries (PromQL)
    Metric,
    /// Analytical SQL
    Sql,
}

impl CanonicalKind {
    /// Map a raw plugin id to its canonical kind.
    ///
    /// Returns `None` for plugins the gateway has no dispatcher for.
    pub fn normalize(raw_kind: &str) -> Option<Self> {
        KNOWN_TYPES
            .iter()
            .find(|(raw, _)| *raw == raw_kind)
            .map(|(_, kind)| *kind)
    }

    /// Raw plugin ids that normalize to this kind.
    pub fn raw_kinds(self) -> impl Iterator<Item = &'static str> {
        KNOWN_TYPES
            .iter()
            .filter(move |(_, kind)| *kind == self)
            .map(|(raw, _)| *raw)
    }

    /// Lowercase name used in tool arguments and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalKind::Log => "log",
            CanonicalKind::Metric => "metric",
            CanonicalKind::Sql => "sql",
        }
    }
}

impl fmt::Display for CanonicalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the upstream datasource catalog, as returned by `GET /api/datasources`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// Opaque identifier assigned by the upstream
    pub uid: String,
    /// Display name
    pub name: String,
    /// Plugin id
    #[serde(rename = "type")]
    pub kind: String,
}

/// A discovered datasource the gateway knows how to query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Datasource {
    /// Opaque identifier assigned by the upstream
    pub uid: String,
    /// Display name
    pub name: String,
    /// Upstream plugin id
    #[serde(rename = "type")]
    pub raw_kind: String,
    /// Canonical kind derived from `raw_kind`
    pub kind: CanonicalKind,
    /// Operator-supplied description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Datasource {
    /// Build a record from a catalog entry, or `None` if its plugin is not supported.
    pub fn from_entry(entry: CatalogEntry, description: Option<String>) -> Option<Self> {
        let kind = CanonicalKind::normalize(&entry.kind)?;
        Some(Self {
            uid: entry.uid,
            name: entry.name,
            raw_kind: entry.kind,
            kind,
            description,
        })
    }
}
