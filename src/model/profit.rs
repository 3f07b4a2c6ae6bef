use crate::error::{MiningError, Result};
use crate::model::Item;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// Unit profit per item
///
/// Items missing from the table have profit 0: they may appear in
/// transactions and count towards transaction size, but never contribute
/// utility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfitRecord", into = "HashMap<Item, f64>")]
pub struct ProfitTable {
    profits: HashMap<Item, f64>,
}

impl ProfitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (item, profit) pairs
    ///
    /// # Errors
    /// `InvalidProfit` for a negative, NaN or infinite profit;
    /// `DuplicateProfit` when an item is listed twice
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<Item>,
    {
        let mut table = Self::new();
        for (item, profit) in pairs {
            let item = item.into();
            validate(&item, profit)?;
            match table.profits.entry(item) {
                Entry::Occupied(entry) => {
                    return Err(MiningError::DuplicateProfit {
                        item: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(profit);
                }
            }
        }
        Ok(table)
    }

    /// Set the unit profit of `item`, replacing any previous value
    pub fn insert(&mut self, item: impl Into<Item>, profit: f64) -> Result<()> {
        let item = item.into();
        validate(&item, profit)?;
        self.profits.insert(item, profit);
        Ok(())
    }

    /// Unit profit of `item` (0.0 if absent)
    pub fn profit(&self, item: &Item) -> f64 {
        self.profits.get(item).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.profits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Item, f64)> {
        self.profits.iter().map(|(item, profit)| (item, *profit))
    }
}

fn validate(item: &Item, profit: f64) -> Result<()> {
    if !profit.is_finite() || profit < 0.0 {
        return Err(MiningError::InvalidProfit {
            item: item.clone(),
            profit,
        });
    }
    Ok(())
}

/// Unvalidated (item, profit) entries in file order
///
/// Deserializes from a JSON object such as `{"A": 4, "B": 2.5}`. Repeated
/// keys are kept, so they surface as `DuplicateProfit` on conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfitRecord(pub Vec<(Item, f64)>);

impl TryFrom<ProfitRecord> for ProfitTable {
    type Error = MiningError;

    fn try_from(record: ProfitRecord) -> Result<Self> {
        Self::from_pairs(record.0)
    }
}

impl<'de> Deserialize<'de> for ProfitRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ProfitVisitor;

        impl<'de> Visitor<'de> for ProfitVisitor {
            type Value = ProfitRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of item to unit profit")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<Item, f64>()? {
                    pairs.push(entry);
                }
                Ok(ProfitRecord(pairs))
            }
        }

        deserializer.deserialize_map(ProfitVisitor)
    }
}

impl From<ProfitTable> for HashMap<Item, f64> {
    fn from(table: ProfitTable) -> Self {
        table.profits
    }
}
