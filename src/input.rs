//! Loading databases and profit tables from files
//!
//! Supported database layouts:
//! - JSON array of transactions: `[{"A": 2, "B": 3}, {"B": 1}]`
//! - JSON object with embedded profits:
//!   `{"transactions": [...], "profits": {"A": 4, "B": 2}}`
//! - Text, one transaction per line: `A:2 B:3` (see [`Database::from_text`])
//!
//! The layout is sniffed from the content, not the file extension.

use crate::model::{Database, ProfitRecord, ProfitTable, TransactionRecord};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Object layout: `{"transactions": [...], "profits": {...}}`
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonDatabase {
    transactions: Vec<TransactionRecord>,
    #[serde(default)]
    profits: Option<ProfitRecord>,
}

/// A database together with the profit table embedded in it, if any
#[derive(Debug, Clone)]
pub struct LoadedDatabase {
    pub database: Database,
    pub profits: Option<ProfitTable>,
}

/// Parse database content in any supported layout
pub fn parse_database(content: &str) -> Result<LoadedDatabase> {
    let (records, profits) = match content.trim_start().chars().next() {
        Some('[') => {
            let records: Vec<TransactionRecord> =
                serde_json::from_str(content).context("Failed to parse JSON database")?;
            (records, None)
        }
        Some('{') => {
            let parsed: JsonDatabase =
                serde_json::from_str(content).context("Failed to parse JSON database")?;
            (parsed.transactions, parsed.profits)
        }
        _ => {
            let database = Database::from_text(content)?;
            return Ok(LoadedDatabase {
                database,
                profits: None,
            });
        }
    };

    let database = Database::from_transaction_records(records)?;
    let profits = profits.map(ProfitTable::try_from).transpose()?;

    Ok(LoadedDatabase { database, profits })
}

/// Read and parse a database file
pub fn load_database<P: AsRef<Path>>(path: P) -> Result<LoadedDatabase> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read database file: {}", path.display()))?;

    let loaded = parse_database(&content)
        .with_context(|| format!("Invalid database file: {}", path.display()))?;

    tracing::debug!(
        "Loaded {} transactions ({} distinct items) from {}",
        loaded.database.len(),
        loaded.database.items().len(),
        path.display()
    );

    Ok(loaded)
}

/// Parse a JSON profit table: `{"A": 4, "B": 2.5}`
///
/// An item listed twice is rejected rather than silently overwritten.
pub fn parse_profits(content: &str) -> Result<ProfitTable> {
    let record: ProfitRecord =
        serde_json::from_str(content).context("Failed to parse JSON profit table")?;
    Ok(ProfitTable::try_from(record)?)
}

/// Read and parse a profit table file
pub fn load_profits<P: AsRef<Path>>(path: P) -> Result<ProfitTable> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profit file: {}", path.display()))?;

    parse_profits(&content).with_context(|| format!("Invalid profit file: {}", path.display()))
}
