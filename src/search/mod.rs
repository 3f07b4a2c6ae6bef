// Depth-First High Utility Occupancy Pattern Search
//
// Enumerates the itemset lattice depth-first. Candidates are the items whose
// TWU reaches min_util, ordered by ascending TWU; each node extends its prefix
// only with candidates after its own last item, so every itemset is visited at
// most once. A node whose TWU falls below min_util is dropped together with its
// whole subtree. Surviving nodes are tested exactly for utility and occupancy.
//
// Scientific Foundation:
// [1] Gan, W., Lin, J. C.-W., Fournier-Viger, P., Chao, H.-C., & Yu, P. S.
//     (2019). HUOPM: High-utility occupancy pattern mining. IEEE Transactions
//     on Cybernetics, 50(3).
// [2] Liu, M., & Qu, J. (2012). Mining high utility itemsets without candidate
//     generation. CIKM. (per-item posting lists joined on extension)
//
// Key Insight: TWU is anti-monotone while utility is not. Pruning on TWU is
// safe; pruning on utility would lose patterns.

mod index;
mod miner;
mod pattern;
mod stats;

pub use miner::{Miner, MiningReport, Termination};
pub use pattern::{sort_patterns, top_patterns, Pattern, SortOrder};
pub use stats::SearchStats;

use crate::config::MiningConfig;
use crate::error::Result;
use crate::model::{Database, ProfitTable};

/// Mine every itemset with `utility >= min_util` and `occupancy >= min_occ`
///
/// # Errors
/// `InvalidThreshold` if `min_util <= 0` or `min_occ` lies outside `[0, 1]`.
///
/// # Example
/// ```
/// use huopm::model::{Database, ProfitTable};
/// use huopm::search::mine;
///
/// let db = Database::from_records(vec![
///     vec![("A", 2), ("B", 3), ("C", 1)],
///     vec![("A", 1), ("B", 1)],
///     vec![("B", 2), ("C", 3)],
///     vec![("A", 1), ("C", 2), ("D", 1)],
/// ]).unwrap();
/// let profits = ProfitTable::from_pairs([("A", 4.0), ("B", 2.0), ("C", 3.0), ("D", 1.0)]).unwrap();
///
/// let patterns = mine(&db, &profits, 12.0, 0.4).unwrap();
/// assert_eq!(patterns.len(), 5);
/// ```
pub fn mine(
    database: &Database,
    profits: &ProfitTable,
    min_util: f64,
    min_occ: f64,
) -> Result<Vec<Pattern>> {
    let config = MiningConfig {
        min_util,
        min_occ,
        ..Default::default()
    };
    Ok(Miner::new(config).run(database, profits)?.patterns)
}

#[cfg(test)]
mod tests;
