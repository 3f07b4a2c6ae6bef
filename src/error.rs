//! Error taxonomy for mining input validation
//!
//! Every error is raised before the search starts. Once a database, profit
//! table and thresholds are accepted, mining itself cannot fail.

use crate::model::Item;
use thiserror::Error;

/// Errors that can occur while validating mining input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MiningError {
    #[error("Invalid quantity {quantity} for item '{item}' in transaction {transaction} (must be > 0)")]
    InvalidQuantity {
        transaction: usize,
        item: Item,
        quantity: i64,
    },

    #[error("Duplicate item '{item}' in transaction {transaction}")]
    DuplicateItem { transaction: usize, item: Item },

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid profit {profit} for item '{item}' (must be finite and >= 0)")]
    InvalidProfit { item: Item, profit: f64 },

    #[error("Duplicate profit for item '{item}'")]
    DuplicateProfit { item: Item },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Result type for mining operations
pub type Result<T> = std::result::Result<T, MiningError>;
