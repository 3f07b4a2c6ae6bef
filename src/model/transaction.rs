use crate::error::{MiningError, Result};
use crate::model::Item;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// One transaction: each distinct item mapped to a positive quantity
///
/// Construction goes through [`Transaction::from_pairs`], which rejects
/// non-positive quantities and repeated items, so every instance upholds the
/// "quantity > 0, item at most once" invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transaction {
    items: BTreeMap<Item, u64>,
}

impl Transaction {
    /// Build a transaction from raw (item, quantity) pairs
    ///
    /// # Arguments
    /// * `index` - Position of the transaction in its database (reported in errors)
    /// * `pairs` - Item/quantity entries, at most one per item
    ///
    /// # Errors
    /// * `InvalidQuantity` if any quantity is zero or negative
    /// * `DuplicateItem` if an item is listed twice
    ///
    /// # Example
    /// ```
    /// use huopm::model::{Item, Transaction};
    ///
    /// let t = Transaction::from_pairs(0, [("A", 2), ("B", 3)]).unwrap();
    /// assert_eq!(t.len(), 2);
    /// assert_eq!(t.quantity(&Item::from("B")), Some(3));
    ///
    /// assert!(Transaction::from_pairs(0, [("A", 0)]).is_err());
    /// assert!(Transaction::from_pairs(0, [("A", 1), ("A", 1)]).is_err());
    /// ```
    pub fn from_pairs<I, K>(index: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<Item>,
    {
        let mut items = BTreeMap::new();

        for (item, quantity) in pairs {
            let item = item.into();
            if quantity <= 0 {
                return Err(MiningError::InvalidQuantity {
                    transaction: index,
                    item,
                    quantity,
                });
            }

            match items.entry(item) {
                Entry::Occupied(entry) => {
                    return Err(MiningError::DuplicateItem {
                        transaction: index,
                        item: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(quantity as u64);
                }
            }
        }

        Ok(Self { items })
    }

    /// Quantity of `item`, or `None` if the transaction does not contain it
    pub fn quantity(&self, item: &Item) -> Option<u64> {
        self.items.get(item).copied()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.items.contains_key(item)
    }

    /// True when every item of `itemset` is present (X ⊆ T)
    pub fn contains_all(&self, itemset: &[Item]) -> bool {
        itemset.iter().all(|item| self.items.contains_key(item))
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Item, u64)> {
        self.items.iter().map(|(item, quantity)| (item, *quantity))
    }
}

/// Unvalidated (item, quantity) entries for one transaction
///
/// Deserializes from a JSON object such as `{"A": 2, "B": 3}`. Repeated keys
/// are kept rather than collapsed, so they surface as `DuplicateItem` when the
/// record is converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRecord(pub Vec<(Item, i64)>);

impl TransactionRecord {
    pub fn into_transaction(self, index: usize) -> Result<Transaction> {
        Transaction::from_pairs(index, self.0)
    }
}

impl<K: Into<Item>> FromIterator<(K, i64)> for TransactionRecord {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(item, quantity)| (item.into(), quantity))
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for TransactionRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = TransactionRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of item to integer quantity")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((item, quantity)) = map.next_entry::<Item, i64>()? {
                    pairs.push((item, quantity));
                }
                Ok(TransactionRecord(pairs))
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}
