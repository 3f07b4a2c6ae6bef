use crate::model::{Item, Itemset};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A qualifying itemset with its database-wide measures
///
/// Produced by the miner and immutable afterwards. `support` is the number
/// of transactions containing the itemset; it is always at least 1 for an
/// emitted pattern.
///
/// Patterns serialize for reporting but cannot be deserialized, so every
/// instance comes from the miner with its itemset sorted:
///
/// ```compile_fail
/// let pattern: huopm::Pattern =
///     serde_json::from_str(r#"{"itemset":["B","A"],"utility":1.0,"occupancy":1.0,"support":1}"#)
///         .unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    itemset: Itemset,
    utility: f64,
    occupancy: f64,
    support: usize,
}

impl Pattern {
    /// `itemset` is sorted on construction
    pub(crate) fn new(mut itemset: Itemset, utility: f64, occupancy: f64, support: usize) -> Self {
        itemset.sort();
        Self {
            itemset,
            utility,
            occupancy,
            support,
        }
    }

    pub fn itemset(&self) -> &[Item] {
        &self.itemset
    }

    pub fn utility(&self) -> f64 {
        self.utility
    }

    pub fn occupancy(&self) -> f64 {
        self.occupancy
    }

    pub fn support(&self) -> usize {
        self.support
    }

    pub fn len(&self) -> usize {
        self.itemset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemset.is_empty()
    }

    /// True when the pattern's itemset equals `names` as a set
    pub fn matches<S: AsRef<str>>(&self, names: &[S]) -> bool {
        let mut wanted: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        wanted.sort_unstable();
        wanted.dedup();
        wanted.len() == self.itemset.len()
            && wanted
                .iter()
                .zip(&self.itemset)
                .all(|(name, item)| *name == item.as_str())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.itemset.iter().map(Item::as_str).collect();
        write!(
            f,
            "{{{}}}  utility={}  occupancy={:.4}  support={}",
            names.join(", "),
            self.utility,
            self.occupancy,
            self.support
        )
    }
}

/// Ordering applied to reported patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Shorter itemsets first, then lexicographic
    #[default]
    Itemset,
    /// Highest utility first
    Utility,
    /// Highest occupancy first
    Occupancy,
}

fn cmp_itemsets(a: &Pattern, b: &Pattern) -> Ordering {
    a.itemset
        .len()
        .cmp(&b.itemset.len())
        .then_with(|| a.itemset.cmp(&b.itemset))
}

/// Sort patterns in place
///
/// Ties on the primary key fall back to itemset order, so the result is
/// fully deterministic.
pub fn sort_patterns(patterns: &mut [Pattern], order: SortOrder) {
    match order {
        SortOrder::Itemset => patterns.sort_by(cmp_itemsets),
        SortOrder::Utility => patterns.sort_by(|a, b| {
            b.utility
                .total_cmp(&a.utility)
                .then_with(|| cmp_itemsets(a, b))
        }),
        SortOrder::Occupancy => patterns.sort_by(|a, b| {
            b.occupancy
                .total_cmp(&a.occupancy)
                .then_with(|| b.utility.total_cmp(&a.utility))
                .then_with(|| cmp_itemsets(a, b))
        }),
    }
}

/// The `k` best patterns under `order`
pub fn top_patterns(patterns: &[Pattern], k: usize, order: SortOrder) -> Vec<Pattern> {
    let mut sorted = patterns.to_vec();
    sort_patterns(&mut sorted, order);
    sorted.truncate(k);
    sorted
}
