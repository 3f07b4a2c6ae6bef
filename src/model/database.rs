use crate::error::{MiningError, Result};
use crate::model::{Item, Transaction, TransactionRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Ordered, validated collection of transactions
///
/// Transaction order never changes mining results, but it is preserved so
/// that transaction indices in errors and posting lists stay reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Database {
    transactions: Vec<Transaction>,
}

impl Database {
    /// Validate raw records into a database
    ///
    /// Fails on the first malformed record; no partially built database is
    /// returned.
    ///
    /// # Example
    /// ```
    /// use huopm::model::Database;
    ///
    /// let db = Database::from_records(vec![
    ///     vec![("A", 2), ("B", 3)],
    ///     vec![("B", 1)],
    /// ]).unwrap();
    /// assert_eq!(db.len(), 2);
    /// ```
    pub fn from_records<I, R, K>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (K, i64)>,
        K: Into<Item>,
    {
        let transactions = records
            .into_iter()
            .enumerate()
            .map(|(index, pairs)| Transaction::from_pairs(index, pairs))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { transactions })
    }

    /// Validate deserialized JSON records into a database
    pub fn from_transaction_records(records: Vec<TransactionRecord>) -> Result<Self> {
        let transactions = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_transaction(index))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { transactions })
    }

    /// Parse the line-oriented text format
    ///
    /// One transaction per line, written as whitespace-separated `item:quantity`
    /// tokens. Blank lines and lines starting with `#` are skipped. The last
    /// `:` splits a token, so item names may themselves contain colons.
    ///
    /// ```text
    /// # basket export
    /// bread:2 milk:1
    /// milk:3 eggs:12
    /// ```
    ///
    /// # Errors
    /// * `Parse` for a token without `:`, an empty item name or a non-integer quantity
    /// * `InvalidQuantity` / `DuplicateItem` as for [`Transaction::from_pairs`]
    pub fn from_text(text: &str) -> Result<Self> {
        let mut transactions = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut pairs = Vec::new();
            for token in line.split_whitespace() {
                pairs.push(parse_token(token, line_no + 1)?);
            }

            transactions.push(Transaction::from_pairs(transactions.len(), pairs)?);
        }

        Ok(Self { transactions })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// Distinct items across all transactions, sorted
    pub fn items(&self) -> Vec<Item> {
        let items: BTreeSet<&Item> = self.transactions.iter().flat_map(|t| t.items()).collect();
        items.into_iter().cloned().collect()
    }

    /// Mean number of distinct items per transaction (0.0 when empty)
    pub fn avg_transaction_len(&self) -> f64 {
        if self.transactions.is_empty() {
            return 0.0;
        }

        let total: usize = self.transactions.iter().map(Transaction::len).sum();
        total as f64 / self.transactions.len() as f64
    }
}

impl<'a> IntoIterator for &'a Database {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

fn parse_token(token: &str, line: usize) -> Result<(Item, i64)> {
    let (item, quantity) = token.rsplit_once(':').ok_or_else(|| MiningError::Parse {
        line,
        message: format!("expected item:quantity, got '{}'", token),
    })?;

    if item.is_empty() {
        return Err(MiningError::Parse {
            line,
            message: format!("empty item name in '{}'", token),
        });
    }

    let quantity = quantity.parse::<i64>().map_err(|_| MiningError::Parse {
        line,
        message: format!("quantity '{}' is not an integer", quantity),
    })?;

    Ok((Item::from(item), quantity))
}
