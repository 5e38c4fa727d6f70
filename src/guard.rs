//! SQL denylist check.
//!
//! A plain substring scan over the lower-cased query. It is not a parser: it can
//! reject harmless queries that mention a pattern inside a literal, and it will not
//! catch obfuscated statements. The datasource's own credentials remain the real
//! access control.

use crate::error::{McpError, Result};

/// Patterns checked in order; the first hit is reported.
pub const FORBIDDEN_PATTERNS: &[&str] = &[
    ";--",
    "; --",
    ";/*",
    "; /*",
    "xp_",
    "sp_",
    "exec(",
    "eval(",
    "drop table",
    "drop database",
    "truncate",
    "insert into",
    "update set",
    "delete from",
];

/// Reject `sql` if it contains a forbidden pattern.
pub fn check(sql: &str) -> Result<()> {
    let lowered = sql.to_lowercase();
    match FORBIDDEN_PATTERNS
        .iter()
        .find(|pattern| lowered.contains(*pattern))
    {
        Some(pattern) => Err(McpError::Rejected {
            pattern: (*pattern).to_string(),
        }),
        None => Ok(()),
    }
}
