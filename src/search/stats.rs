use std::fmt;
use std::time::Duration;

/// Counters collected during one mining run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Transactions in the mined database.
    pub transactions: usize,
    /// Distinct items in the database.
    pub items_total: usize,
    /// Items whose TWU passed `min_util` and entered the search.
    pub candidates: usize,
    /// Itemsets whose TWU was evaluated.
    pub nodes_explored: u64,
    /// Itemsets abandoned (with their subtree) because `twu < min_util`.
    pub prunings_twu: u64,
    /// Itemsets that met both thresholds.
    pub patterns_found: u64,
    /// Largest itemset length reached.
    pub max_depth: u64,
    /// Wall time of the run, index construction included.
    pub elapsed: Duration,
}

impl SearchStats {
    #[inline]
    pub fn on_node_explored(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn on_pruned(&mut self) {
        self.prunings_twu = self.prunings_twu.saturating_add(1);
    }

    #[inline]
    pub fn on_pattern_found(&mut self) {
        self.patterns_found = self.patterns_found.saturating_add(1);
    }

    /// Share of explored nodes cut by the TWU bound (0.0 when nothing was explored)
    pub fn prune_ratio(&self) -> f64 {
        if self.nodes_explored == 0 {
            return 0.0;
        }
        self.prunings_twu as f64 / self.nodes_explored as f64
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "transactions:    {}", self.transactions)?;
        writeln!(
            f,
            "items:           {} ({} candidates)",
            self.items_total, self.candidates
        )?;
        writeln!(f, "nodes explored:  {}", self.nodes_explored)?;
        writeln!(
            f,
            "twu prunings:    {} ({:.1}%)",
            self.prunings_twu,
            self.prune_ratio() * 100.0
        )?;
        writeln!(f, "patterns found:  {}", self.patterns_found)?;
        writeln!(f, "max depth:       {}", self.max_depth)?;
        write!(f, "elapsed:         {:.3}ms", self.elapsed.as_secs_f64() * 1000.0)
    }
}
