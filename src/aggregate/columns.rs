//! Best-effort mapping from logical column roles to dataset headers.
//!
//! Role patterns are matched case-insensitively against header names,
//! once per dataset load, so aggregation never re-sniffs per row.

use crate::config::ColumnPatterns;
use anyhow::{Context, Result};
use regex::Regex;

/// Resolved column roles for one dataset. `value`/`quantity` stay
/// `None` when no header matches, which makes downstream extraction
/// fail closed instead of guessing a wrong column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub counterparty: String,
    pub period: String,
    pub value: Option<String>,
    pub quantity: Option<String>,
}

impl ColumnMap {
    /// Resolve roles against the header row. First match wins. The
    /// counterparty role falls back to the first column, the period
    /// role to a literal "Year" header.
    pub fn resolve(headers: &[String], patterns: &ColumnPatterns) -> Result<Self> {
        let counterparty = match_header(headers, &patterns.counterparty)?
            .or_else(|| headers.first().cloned())
            .unwrap_or_default();
        let period =
            match_header(headers, &patterns.period)?.unwrap_or_else(|| "Year".to_string());
        let value = match_header(headers, &patterns.value)?;
        let quantity = match_header(headers, &patterns.quantity)?;
        log::debug!(
            "resolved columns: counterparty={counterparty:?} period={period:?} \
             value={value:?} quantity={quantity:?}"
        );
        Ok(Self {
            counterparty,
            period,
            value,
            quantity,
        })
    }
}

fn match_header(headers: &[String], pattern: &str) -> Result<Option<String>> {
    let re = Regex::new(&format!("(?i){pattern}"))
        .with_context(|| format!("invalid column pattern '{pattern}'"))?;
    Ok(headers.iter().find(|h| re.is_match(h)).cloned())
}
