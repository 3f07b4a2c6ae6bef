//! Occupancy engine
//!
//! Occupancy measures how much of a transaction an itemset accounts for:
//! `|X| / |T|`. Averaged over the supporting transactions it favours
//! itemsets that dominate the baskets they appear in over itemsets that are
//! merely frequent. Quantities play no part, only presence and size.
//!
//! Reference: Tang, L., Zhang, L., Luo, P., & Wang, M. (2012). Incorporating
//! occupancy into frequent pattern mining for high quality pattern
//! recommendation. CIKM.

use crate::model::{Database, Item, Transaction};

/// `|X| / |T|` for `X ⊆ T`; `None` when the transaction does not contain `X`
pub fn occupancy_in(itemset: &[Item], transaction: &Transaction) -> Option<f64> {
    if transaction.is_empty() || !transaction.contains_all(itemset) {
        return None;
    }
    Some(itemset.len() as f64 / transaction.len() as f64)
}

/// Number of transactions containing `itemset`
pub fn support(itemset: &[Item], database: &Database) -> usize {
    database
        .iter()
        .filter(|transaction| transaction.contains_all(itemset))
        .count()
}

/// Average occupancy of `itemset` over its supporting transactions
///
/// Returns 0.0 when no transaction contains the itemset. That value only
/// avoids a division by zero: use [`support`] to tell an unsupported itemset
/// from a rare one.
///
/// # Example
/// ```
/// use huopm::model::{Database, Item};
/// use huopm::occupancy::occupancy;
///
/// let db = Database::from_records(vec![
///     vec![("A", 1), ("B", 1)],
///     vec![("A", 1), ("B", 1), ("C", 1), ("D", 1)],
/// ]).unwrap();
///
/// // (1/2 + 1/4) / 2
/// assert_eq!(occupancy(&[Item::from("A")], &db), 0.375);
/// assert_eq!(occupancy(&[Item::from("Z")], &db), 0.0);
/// ```
pub fn occupancy(itemset: &[Item], database: &Database) -> f64 {
    let mut sum = 0.0;
    let mut support = 0usize;

    for transaction in database {
        if let Some(occ) = occupancy_in(itemset, transaction) {
            sum += occ;
            support += 1;
        }
    }

    if support == 0 {
        return 0.0;
    }
    sum / support as f64
}
