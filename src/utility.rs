//! Utility engine: profit-weighted quantities
//!
//! Utility replaces plain support as the measure of an itemset's value:
//! an item bought twice at profit 4 is worth 8, regardless of how many
//! transactions contain it.
//!
//! Every function here scans its input directly. The search engine uses a
//! posting-list index instead, and sums each transaction's terms in item
//! order just as [`itemset_utility_in`] does for a sorted itemset, so both
//! give the same `f64` for the same pattern.

use crate::model::{Database, Item, ProfitTable, Transaction};

/// `quantity(item, T) × profit(item)`; 0.0 when `item ∉ T`
pub fn item_utility(item: &Item, transaction: &Transaction, profits: &ProfitTable) -> f64 {
    transaction
        .quantity(item)
        .map_or(0.0, |quantity| quantity as f64 * profits.profit(item))
}

/// Sum of the utilities of every item in the transaction
pub fn transaction_utility(transaction: &Transaction, profits: &ProfitTable) -> f64 {
    transaction
        .iter()
        .fold(0.0, |acc, (item, quantity)| {
            acc + quantity as f64 * profits.profit(item)
        })
}

/// Utility of `itemset` within one transaction
///
/// Only defined when the itemset is contained in the transaction; returns
/// `None` otherwise. Items are summed in the order given.
pub fn itemset_utility_in(
    itemset: &[Item],
    transaction: &Transaction,
    profits: &ProfitTable,
) -> Option<f64> {
    let mut utility = 0.0;
    for item in itemset {
        let quantity = transaction.quantity(item)?;
        utility += quantity as f64 * profits.profit(item);
    }
    Some(utility)
}

/// Utility of `itemset` across the database
///
/// Sums [`itemset_utility_in`] over every transaction containing the itemset.
/// An itemset with no support has utility 0.0.
///
/// # Example
/// ```
/// use huopm::model::{Database, Item, ProfitTable};
/// use huopm::utility::itemset_utility;
///
/// let db = Database::from_records(vec![
///     vec![("A", 2), ("B", 3)],
///     vec![("A", 1)],
/// ]).unwrap();
/// let profits = ProfitTable::from_pairs([("A", 4.0), ("B", 2.0)]).unwrap();
///
/// assert_eq!(itemset_utility(&[Item::from("A")], &db, &profits), 12.0);
/// assert_eq!(itemset_utility(&[Item::from("A"), Item::from("B")], &db, &profits), 14.0);
/// assert_eq!(itemset_utility(&[Item::from("Z")], &db, &profits), 0.0);
/// ```
pub fn itemset_utility(itemset: &[Item], database: &Database, profits: &ProfitTable) -> f64 {
    database
        .iter()
        .filter_map(|transaction| itemset_utility_in(itemset, transaction, profits))
        .fold(0.0, |acc, utility| acc + utility)
}
