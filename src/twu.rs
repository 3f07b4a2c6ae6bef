//! Transaction-Weighted Utility (TWU) upper bounds
//!
//! `twu(X)` sums the full utility of every transaction containing `X`. Any
//! superset of `X` is contained in a subset of those transactions and can
//! only collect part of their utility, so `twu(X) < min_util` proves that no
//! extension of `X` qualifies. This is the pruning rule of the search.
//!
//! TWU bounds future utility, not current utility: it is never a substitute
//! for the exact check in [`crate::utility::itemset_utility`].
//!
//! Reference: Liu, Y., Liao, W., & Choudhary, A. (2005). A two-phase algorithm
//! for fast discovery of high utility itemsets. PAKDD.

use crate::model::{Database, Item, ProfitTable};
use crate::utility::transaction_utility;
use fnv::FnvHashMap;

/// TWU of a single item
pub fn item_twu(item: &Item, database: &Database, profits: &ProfitTable) -> f64 {
    database
        .iter()
        .filter(|transaction| transaction.contains(item))
        .fold(0.0, |acc, transaction| {
            acc + transaction_utility(transaction, profits)
        })
}

/// TWU of an itemset: total utility of the transactions containing all of it
pub fn itemset_twu(itemset: &[Item], database: &Database, profits: &ProfitTable) -> f64 {
    database
        .iter()
        .filter(|transaction| transaction.contains_all(itemset))
        .fold(0.0, |acc, transaction| {
            acc + transaction_utility(transaction, profits)
        })
}

/// Per-item TWU for every item of a database, computed in one pass
#[derive(Debug, Clone, Default)]
pub struct TwuTable {
    twu: FnvHashMap<Item, f64>,
}

impl TwuTable {
    /// Build the table with a single database scan
    pub fn build(database: &Database, profits: &ProfitTable) -> Self {
        let mut twu: FnvHashMap<Item, f64> = FnvHashMap::default();

        for transaction in database {
            let tu = transaction_utility(transaction, profits);
            for item in transaction.items() {
                *twu.entry(item.clone()).or_insert(0.0) += tu;
            }
        }

        Self { twu }
    }

    /// TWU of `item` (0.0 for items absent from the database)
    pub fn get(&self, item: &Item) -> f64 {
        self.twu.get(item).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.twu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.twu.is_empty()
    }

    /// Items that survive the pruning rule, ascending by TWU
    ///
    /// Ties are broken by item order so the candidate list, and therefore the
    /// search order, is reproducible.
    pub fn promising(&self, min_util: f64) -> Vec<(Item, f64)> {
        let mut candidates: Vec<(Item, f64)> = self
            .twu
            .iter()
            .filter(|(_, twu)| **twu >= min_util)
            .map(|(item, twu)| (item.clone(), *twu))
            .collect();

        candidates.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        candidates
    }
}
