// Search engine tests
//
// The reference database below is small enough to verify by hand:
//
//   T0 {A:2, B:3, C:1}  tu = 17
//   T1 {A:1, B:1}       tu = 6
//   T2 {B:2, C:3}       tu = 13
//   T3 {A:1, C:2, D:1}  tu = 11
//
// profits A=4 B=2 C=3 D=1, so twu(A)=34 twu(B)=36 twu(C)=41 twu(D)=11.

use super::*;
use crate::error::MiningError;
use crate::model::Item;
use crate::occupancy::{occupancy, support};
use crate::utility::itemset_utility;
use std::sync::atomic::AtomicBool;

fn reference() -> (Database, ProfitTable) {
    let db = Database::from_records(vec![
        vec![("A", 2), ("B", 3), ("C", 1)],
        vec![("A", 1), ("B", 1)],
        vec![("B", 2), ("C", 3)],
        vec![("A", 1), ("C", 2), ("D", 1)],
    ])
    .unwrap();
    let profits =
        ProfitTable::from_pairs([("A", 4.0), ("B", 2.0), ("C", 3.0), ("D", 1.0)]).unwrap();
    (db, profits)
}

fn find<'p>(patterns: &'p [Pattern], names: &[&str]) -> &'p Pattern {
    patterns
        .iter()
        .find(|p| p.matches(names))
        .unwrap_or_else(|| panic!("pattern {:?} not found", names))
}

fn config(min_util: f64, min_occ: f64) -> MiningConfig {
    MiningConfig {
        min_util,
        min_occ,
        ..Default::default()
    }
}

#[test]
fn test_reference_fixture_exact_pattern_set() {
    let (db, profits) = reference();
    let patterns = mine(&db, &profits, 12.0, 0.4).unwrap();

    assert_eq!(patterns.len(), 5);

    let b = find(&patterns, &["B"]);
    assert_eq!(b.utility(), 12.0);
    assert!((b.occupancy() - 4.0 / 9.0).abs() < 1e-12);

    let ab = find(&patterns, &["A", "B"]);
    assert_eq!(ab.utility(), 20.0);
    assert!((ab.occupancy() - 5.0 / 6.0).abs() < 1e-12);

    let ac = find(&patterns, &["A", "C"]);
    assert_eq!(ac.utility(), 21.0);
    assert!((ac.occupancy() - 2.0 / 3.0).abs() < 1e-12);

    let bc = find(&patterns, &["B", "C"]);
    assert_eq!(bc.utility(), 22.0);
    assert!((bc.occupancy() - 5.0 / 6.0).abs() < 1e-12);

    let abc = find(&patterns, &["A", "B", "C"]);
    assert_eq!(abc.utility(), 17.0);
    assert_eq!(abc.occupancy(), 1.0);
}

#[test]
fn test_reference_fixture_rejects_low_occupancy_singletons() {
    let (db, profits) = reference();
    let patterns = mine(&db, &profits, 12.0, 0.4).unwrap();

    // {A}: utility 16 but occupancy 7/18 < 0.4
    assert!(!patterns.iter().any(|p| p.matches(&["A"])));
    // {C}: utility 18 but occupancy 7/18 < 0.4
    assert!(!patterns.iter().any(|p| p.matches(&["C"])));
}

#[test]
fn test_single_transaction() {
    let db = Database::from_records(vec![vec![("X", 3)]]).unwrap();
    let profits = ProfitTable::from_pairs([("X", 5.0)]).unwrap();

    let patterns = mine(&db, &profits, 10.0, 0.5).unwrap();

    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].itemset(), &[Item::from("X")]);
    assert_eq!(patterns[0].utility(), 15.0);
    assert_eq!(patterns[0].occupancy(), 1.0);
    assert_eq!(patterns[0].support(), 1);
}

#[test]
fn test_empty_database_yields_nothing() {
    let db = Database::default();
    let profits = ProfitTable::new();

    assert!(mine(&db, &profits, 1.0, 0.0).unwrap().is_empty());
}

#[test]
fn test_min_util_above_maximum_yields_nothing() {
    let (db, profits) = reference();

    // Largest itemset utility in the fixture is 22 ({B, C})
    for min_occ in [0.0, 0.4, 1.0] {
        assert!(mine(&db, &profits, 22.5, min_occ).unwrap().is_empty());
    }
    assert_eq!(mine(&db, &profits, 22.0, 0.0).unwrap().len(), 1);
}

#[test]
fn test_pruned_items_never_appear() {
    let (db, profits) = reference();
    let patterns = mine(&db, &profits, 12.0, 0.0).unwrap();

    // twu(D) = 11 < 12
    assert!(!patterns.is_empty());
    assert!(patterns
        .iter()
        .all(|p| !p.itemset().contains(&Item::from("D"))));
}

#[test]
fn test_patterns_satisfy_thresholds_and_match_scanning_engines() {
    let (db, profits) = reference();

    for (min_util, min_occ) in [(1.0, 0.0), (5.0, 0.3), (12.0, 0.4), (17.0, 0.9)] {
        let patterns = mine(&db, &profits, min_util, min_occ).unwrap();
        for p in &patterns {
            assert!(p.utility() >= min_util);
            assert!(p.occupancy() >= min_occ);
            assert_eq!(p.utility(), itemset_utility(p.itemset(), &db, &profits));
            assert!((p.occupancy() - occupancy(p.itemset(), &db)).abs() < 1e-12);
            assert_eq!(p.support(), support(p.itemset(), &db));
        }
    }
}

#[test]
fn test_low_threshold_enumerates_every_supported_itemset_once() {
    let (db, profits) = reference();
    let patterns = mine(&db, &profits, 0.5, 0.0).unwrap();

    // Supported itemsets: 4 singletons, AB AC AD BC CD, ABC ACD
    assert_eq!(patterns.len(), 11);

    let mut keys: Vec<Vec<Item>> = patterns.iter().map(|p| p.itemset().to_vec()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 11);
}

#[test]
fn test_invalid_thresholds_fail_before_search() {
    let (db, profits) = reference();

    for (min_util, min_occ) in [(0.0, 0.5), (-3.0, 0.5), (10.0, -0.1), (10.0, 1.5)] {
        let err = mine(&db, &profits, min_util, min_occ).unwrap_err();
        assert!(matches!(err, MiningError::InvalidThreshold(_)));
    }
}

#[test]
fn test_zero_profit_items_only_dilute_occupancy() {
    let db = Database::from_records(vec![
        vec![("A", 2), ("bag", 1)],
        vec![("A", 2)],
    ])
    .unwrap();
    let profits = ProfitTable::from_pairs([("A", 5.0)]).unwrap();

    let patterns = mine(&db, &profits, 10.0, 0.0).unwrap();

    let a = find(&patterns, &["A"]);
    assert_eq!(a.utility(), 20.0);
    assert_eq!(a.occupancy(), 0.75);
    // {A, bag} has utility 10 in T0 only
    let a_bag = find(&patterns, &["A", "bag"]);
    assert_eq!(a_bag.utility(), 10.0);
    assert_eq!(a_bag.occupancy(), 1.0);
}

#[test]
fn test_miner_reports_stats() {
    let (db, profits) = reference();
    let report = Miner::new(config(12.0, 0.4)).run(&db, &profits).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.stats.transactions, 4);
    assert_eq!(report.stats.items_total, 4);
    assert_eq!(report.stats.candidates, 3);
    assert_eq!(report.stats.patterns_found, 5);
    assert_eq!(report.stats.max_depth, 3);
    // A, AB, ABC, AC, B, BC, C
    assert_eq!(report.stats.nodes_explored, 7);
    assert_eq!(report.stats.prunings_twu, 0);
}

#[test]
fn test_miner_counts_twu_prunings() {
    let (db, profits) = reference();
    let report = Miner::new(config(20.0, 0.0)).run(&db, &profits).unwrap();

    // twu(AB)=23, twu(AC)=28, twu(BC)=30 survive; twu(ABC)=17 is pruned
    assert_eq!(report.stats.prunings_twu, 1);
    assert!(report.patterns.iter().all(|p| p.len() < 3));
}

#[test]
fn test_miner_sorts_by_config() {
    let (db, profits) = reference();
    let report = Miner::new(MiningConfig {
        sort: SortOrder::Utility,
        ..config(12.0, 0.4)
    })
    .run(&db, &profits)
    .unwrap();

    let utilities: Vec<f64> = report.patterns.iter().map(Pattern::utility).collect();
    assert_eq!(utilities, vec![22.0, 21.0, 20.0, 17.0, 12.0]);
}

#[test]
fn test_miner_pattern_limit() {
    let (db, profits) = reference();
    let report = Miner::new(MiningConfig {
        max_patterns: Some(2),
        ..config(12.0, 0.4)
    })
    .run(&db, &profits)
    .unwrap();

    assert_eq!(report.termination, Termination::PatternLimit(2));
    assert!(!report.is_complete());
    assert_eq!(report.patterns.len(), 2);
}

#[test]
fn test_miner_interrupt_before_start() {
    let (db, profits) = reference();
    let stop = AtomicBool::new(true);

    let report = Miner::new(config(12.0, 0.4))
        .with_interrupt(&stop)
        .run(&db, &profits)
        .unwrap();

    assert_eq!(report.termination, Termination::Interrupted);
    assert!(report.patterns.is_empty());
    assert_eq!(report.stats.nodes_explored, 0);
}

#[test]
fn test_miner_clear_flag_runs_to_completion() {
    let (db, profits) = reference();
    let stop = AtomicBool::new(false);

    let report = Miner::new(config(12.0, 0.4))
        .with_interrupt(&stop)
        .run(&db, &profits)
        .unwrap();

    assert_eq!(report.termination, Termination::Completed);
    assert_eq!(report.patterns.len(), 5);
}

#[test]
fn test_result_independent_of_transaction_order() {
    let (db, profits) = reference();
    let reversed = Database::from_records(vec![
        vec![("A", 1), ("C", 2), ("D", 1)],
        vec![("B", 2), ("C", 3)],
        vec![("A", 1), ("B", 1)],
        vec![("A", 2), ("B", 3), ("C", 1)],
    ])
    .unwrap();

    let forward = mine(&db, &profits, 12.0, 0.4).unwrap();
    let backward = mine(&reversed, &profits, 12.0, 0.4).unwrap();

    assert_eq!(forward.len(), backward.len());
    for p in &forward {
        let q = backward
            .iter()
            .find(|q| q.itemset() == p.itemset())
            .unwrap();
        assert_eq!(p.utility(), q.utility());
        assert!((p.occupancy() - q.occupancy()).abs() < 1e-12);
    }
}

#[test]
fn test_pattern_limit_equal_to_result_size_keeps_every_pattern() {
    let (db, profits) = reference();
    let report = Miner::new(MiningConfig {
        max_patterns: Some(5),
        ..config(12.0, 0.4)
    })
    .run(&db, &profits)
    .unwrap();

    // The search stops at the fifth pattern without knowing it was the last
    assert_eq!(report.termination, Termination::PatternLimit(5));
    assert_eq!(report.patterns.len(), 5);
    assert!(report.patterns.iter().any(|p| p.matches(&["A", "B", "C"])));
}

// Extension follows ascending TWU (B, C, then A here) while the scanning
// engine adds a sorted itemset's terms as A, B, C. With these profits the
// two orders round differently unless the miner sums in item order.
fn fractional() -> (Database, ProfitTable) {
    let db = Database::from_records(vec![
        vec![("A", 1), ("B", 1), ("C", 1)],
        vec![("A", 1), ("Z", 100)],
    ])
    .unwrap();
    let profits =
        ProfitTable::from_pairs([("A", 0.1), ("B", 0.2), ("C", 0.3), ("Z", 1.0)]).unwrap();
    (db, profits)
}

#[test]
fn test_fractional_profits_match_scanning_utility() {
    let (db, profits) = fractional();
    let patterns = mine(&db, &profits, 0.05, 0.0).unwrap();

    for pattern in &patterns {
        assert_eq!(
            pattern.utility(),
            itemset_utility(pattern.itemset(), &db, &profits),
            "utility of {}",
            pattern
        );
    }
}

#[test]
fn test_fractional_threshold_at_exact_scanning_utility() {
    let (db, profits) = fractional();
    let abc = [Item::from("A"), Item::from("B"), Item::from("C")];
    let min_util = itemset_utility(&abc, &db, &profits);

    let patterns = mine(&db, &profits, min_util, 0.0).unwrap();

    let found = find(&patterns, &["A", "B", "C"]);
    assert_eq!(found.utility(), min_util);
}
