//! Time expression and duration literal parsing.
//!
//! Loki wants nanosecond timestamps, Prometheus wants seconds and the unified query
//! endpoint wants milliseconds. Everything is parsed to nanoseconds first and then
//! narrowed per backend.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{McpError, Result};

const NANOS_PER_SECOND: i64 = 1_000_000_000;
const NANOS_PER_MILLI: i64 = 1_000_000;

/// Seconds per unit letter.
fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3_600),
        'd' => Some(86_400),
        _ => None,
    }
}

/// Split `"<digits><unit>"` into its count and unit multiplier.
fn split_unit(s: &str) -> Option<(u64, u64)> {
    let unit = s.chars().last()?;
    let multiplier = unit_seconds(unit)?;
    let digits = &s[..s.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = digits.parse::<u64>().ok()?;
    Some((count, multiplier))
}

fn to_nanos(dt: DateTime<Utc>, expr: &str) -> Result<i64> {
    dt.timestamp_nanos_opt()
        .ok_or_else(|| McpError::Parse(format!("time '{}' is out of range", expr)))
}

/// Parse a time expression into nanoseconds since the epoch.
///
/// Accepts `now`, `now-<N><unit>` with unit one of `s`, `m`, `h`, `d`, or an RFC 3339
/// timestamp.
pub fn parse_time(expr: &str) -> Result<i64> {
    parse_time_at(expr, Utc::now())
}

/// Parse a time expression relative to a fixed `now`.
///
/// Used when several bounds of one request must agree on the same reference instant.
pub fn parse_time_at(expr: &str, now: DateTime<Utc>) -> Result<i64> {
    let expr = expr.trim();

    if expr == "now" {
        return to_nanos(now, expr);
    }

    if let Some(offset) = expr.strip_prefix("now-") {
        let (count, multiplier) = split_unit(offset).ok_or_else(|| {
            McpError::Parse(format!(
                "invalid relative time '{}': expected now-<N><s|m|h|d>",
                expr
            ))
        })?;
        let seconds = count
            .checked_mul(multiplier)
            .and_then(|s| i64::try_from(s).ok())
            .and_then(|s| s.checked_mul(NANOS_PER_SECOND))
            .ok_or_else(|| McpError::Parse(format!("relative time '{}' is out of range", expr)))?;
        let now_ns = to_nanos(now, expr)?;
        return Ok(now_ns - seconds);
    }

    let parsed = DateTime::parse_from_rfc3339(expr).map_err(|e| {
        McpError::Parse(format!(
            "invalid time '{}': expected 'now', 'now-<N><unit>' or RFC 3339 ({})",
            expr, e
        ))
    })?;
    to_nanos(parsed.with_timezone(&Utc), expr)
}

/// Nanoseconds to whole seconds, rounding toward negative infinity.
pub fn nanos_to_seconds(ns: i64) -> i64 {
    ns.div_euclid(NANOS_PER_SECOND)
}

/// Nanoseconds to whole milliseconds, rounding toward negative infinity.
pub fn nanos_to_millis(ns: i64) -> i64 {
    ns.div_euclid(NANOS_PER_MILLI)
}

/// Start and end of a query, in nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive start
    pub start_ns: i64,
    /// Inclusive end
    pub end_ns: i64,
}

impl TimeWindow {
    /// Resolve both bounds against the same `now`.
    pub fn parse(start: &str, end: &str, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            start_ns: parse_time_at(start, now)?,
            end_ns: parse_time_at(end, now)?,
        })
    }

    /// Bounds in whole seconds.
    pub fn seconds(&self) -> (i64, i64) {
        (nanos_to_seconds(self.start_ns), nanos_to_seconds(self.end_ns))
    }

    /// Bounds in whole milliseconds.
    pub fn millis(&self) -> (i64, i64) {
        (nanos_to_millis(self.start_ns), nanos_to_millis(self.end_ns))
    }
}

/// A duration as supplied in tool arguments: a bare number of seconds or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DurationLiteral {
    /// Plain seconds
    Seconds(u64),
    /// `"60"`, `"30s"`, `"5m"`, `"2h"`, `"1d"`
    Text(String),
}

impl DurationLiteral {
    /// Resolve to whole seconds.
    pub fn seconds(&self) -> Result<u64> {
        match self {
            DurationLiteral::Seconds(s) => Ok(*s),
            DurationLiteral::Text(text) => {
                let text = text.trim();
                if let Ok(seconds) = text.parse::<u64>() {
                    return Ok(seconds);
                }
                let (count, multiplier) = split_unit(text).ok_or_else(|| {
                    McpError::Parse(format!(
                        "invalid duration '{}': expected <N> or <N><s|m|h|d>",
                        text
                    ))
                })?;
                count.checked_mul(multiplier).ok_or_else(|| {
                    McpError::Parse(format!("duration '{}' is out of range", text))
                })
            }
        }
    }
}

impl From<u64> for DurationLiteral {
    fn from(seconds: u64) -> Self {
        DurationLiteral::Seconds(seconds)
    }
}

impl From<&str> for DurationLiteral {
    fn from(text: &str) -> Self {
        DurationLiteral::Text(text.to_string())
    }
}

impl From<String> for DurationLiteral {
    fn from(text: String) -> Self {
        DurationLiteral::Text(text)
    }
}

/// Parse a duration literal into whole seconds.
pub fn parse_duration_seconds(value: impl Into<DurationLiteral>) -> Result<u64> {
    value.into().seconds()
}
