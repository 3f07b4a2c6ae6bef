use crate::config::MiningConfig;
use crate::error::Result;
use crate::model::{Database, Item, ProfitTable};
use crate::search::index::PostingIndex;
use crate::search::pattern::{sort_patterns, Pattern};
use crate::search::stats::SearchStats;
use crate::twu::TwuTable;
use std::fmt;
use std::ops::{ControlFlow, Range};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Why a mining run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The whole lattice was explored; the pattern set is complete.
    Completed,
    /// The stop flag was raised; the pattern set is partial.
    Interrupted,
    /// `max_patterns` patterns were found; the pattern set may be partial.
    ///
    /// Also reported when the complete result has exactly `max_patterns`
    /// patterns, since the search stops before it can tell.
    PatternLimit(usize),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Completed => write!(f, "Completed"),
            Termination::Interrupted => write!(f, "Interrupted"),
            Termination::PatternLimit(limit) => write!(f, "Pattern limit ({}) reached", limit),
        }
    }
}

/// Outcome of [`Miner::run`]
#[derive(Debug, Clone)]
pub struct MiningReport {
    pub patterns: Vec<Pattern>,
    pub stats: SearchStats,
    pub termination: Termination,
}

impl MiningReport {
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }
}

/// Depth-first HUOPM miner
///
/// # Example
/// ```
/// use huopm::config::MiningConfig;
/// use huopm::model::{Database, ProfitTable};
/// use huopm::search::Miner;
///
/// let db = Database::from_records(vec![vec![("X", 3)]]).unwrap();
/// let profits = ProfitTable::from_pairs([("X", 5.0)]).unwrap();
/// let config = MiningConfig { min_util: 10.0, min_occ: 0.5, ..Default::default() };
///
/// let report = Miner::new(config).run(&db, &profits).unwrap();
/// assert!(report.is_complete());
/// assert_eq!(report.patterns.len(), 1);
/// assert_eq!(report.patterns[0].utility(), 15.0);
/// ```
#[derive(Debug, Clone)]
pub struct Miner<'a> {
    config: MiningConfig,
    stop_flag: Option<&'a AtomicBool>,
}

impl<'a> Miner<'a> {
    pub fn new(config: MiningConfig) -> Self {
        Self {
            config,
            stop_flag: None,
        }
    }

    /// Stop cooperatively once `stop_flag` becomes `true`
    ///
    /// The flag is checked before every candidate test; patterns found up to
    /// that point are returned with [`Termination::Interrupted`].
    pub fn with_interrupt(mut self, stop_flag: &'a AtomicBool) -> Self {
        self.stop_flag = Some(stop_flag);
        self
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Mine every itemset meeting both thresholds
    ///
    /// # Errors
    /// `InvalidThreshold` if the configuration is out of range. Nothing can
    /// fail once the search has started.
    pub fn run(&self, database: &Database, profits: &ProfitTable) -> Result<MiningReport> {
        self.config.validate()?;
        let start = Instant::now();

        let twu = TwuTable::build(database, profits);
        let candidates: Vec<Item> = twu
            .promising(self.config.min_util)
            .into_iter()
            .map(|(item, _)| item)
            .collect();
        let index = PostingIndex::build(database, profits, &candidates);

        tracing::info!(
            "Mining {} transactions: {} of {} items pass twu >= {}",
            database.len(),
            candidates.len(),
            twu.len(),
            self.config.min_util
        );

        let mut search = Search {
            config: &self.config,
            candidates: &candidates,
            index: &index,
            stop_flag: self.stop_flag,
            patterns: Vec::new(),
            stats: SearchStats {
                transactions: database.len(),
                items_total: twu.len(),
                candidates: candidates.len(),
                ..Default::default()
            },
        };

        let termination = match search.explore(&[], None, 0..candidates.len()) {
            ControlFlow::Continue(()) => Termination::Completed,
            ControlFlow::Break(reason) => reason,
        };

        let Search {
            mut patterns,
            mut stats,
            ..
        } = search;
        stats.elapsed = start.elapsed();
        sort_patterns(&mut patterns, self.config.sort);

        tracing::info!(
            "Mining finished ({}): {} patterns, {} nodes, {} pruned",
            termination,
            patterns.len(),
            stats.nodes_explored,
            stats.prunings_twu
        );

        Ok(MiningReport {
            patterns,
            stats,
            termination,
        })
    }
}

/// State of one depth-first traversal
///
/// Itemsets are carried as positions into `candidates`; a node's cover
/// (the ids of the transactions containing it) belongs to that node alone
/// and is handed down to its children by reference.
struct Search<'r> {
    config: &'r MiningConfig,
    candidates: &'r [Item],
    index: &'r PostingIndex,
    stop_flag: Option<&'r AtomicBool>,
    patterns: Vec<Pattern>,
    stats: SearchStats,
}

impl Search<'_> {
    fn interrupted(&self) -> bool {
        self.stop_flag
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Extend `prefix` by each candidate in `remaining`, in order
    ///
    /// `cover` is `None` at the root, where the prefix is empty and
    /// covers every transaction.
    fn explore(
        &mut self,
        prefix: &[usize],
        cover: Option<&[usize]>,
        remaining: Range<usize>,
    ) -> ControlFlow<Termination> {
        for candidate in remaining.clone() {
            if self.interrupted() {
                return ControlFlow::Break(Termination::Interrupted);
            }

            let mut itemset = Vec::with_capacity(prefix.len() + 1);
            itemset.extend_from_slice(prefix);
            itemset.push(candidate);
            self.stats.on_node_explored(itemset.len());

            let extended = match cover {
                Some(cover) => self.index.extend(cover, candidate),
                None => self.index.cover(candidate),
            };

            let twu = self.index.twu(&extended);
            if twu < self.config.min_util {
                self.stats.on_pruned();
                tracing::trace!(
                    "Pruned {:?} (twu {} < {})",
                    self.names(&itemset),
                    twu,
                    self.config.min_util
                );
                continue;
            }

            let utility = self.index.utility(&itemset, &extended);
            let occupancy = self.index.occupancy(&extended, itemset.len());
            if utility >= self.config.min_util && occupancy >= self.config.min_occ {
                self.emit(&itemset, utility, occupancy, extended.len());

                if let Some(limit) = self.config.max_patterns {
                    if self.patterns.len() >= limit {
                        return ControlFlow::Break(Termination::PatternLimit(limit));
                    }
                }
            }

            let children = candidate + 1..remaining.end;
            if let ControlFlow::Break(reason) =
                self.explore(&itemset, Some(extended.as_slice()), children)
            {
                return ControlFlow::Break(reason);
            }
        }

        ControlFlow::Continue(())
    }

    fn emit(&mut self, itemset: &[usize], utility: f64, occupancy: f64, support: usize) {
        let items: Vec<Item> = itemset
            .iter()
            .map(|&pos| self.candidates[pos].clone())
            .collect();
        let pattern = Pattern::new(items, utility, occupancy, support);

        tracing::debug!("Found {}", pattern);
        self.stats.on_pattern_found();
        self.patterns.push(pattern);
    }

    fn names(&self, itemset: &[usize]) -> Vec<&str> {
        itemset
            .iter()
            .map(|&pos| self.candidates[pos].as_str())
            .collect()
    }
}
