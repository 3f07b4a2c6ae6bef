//! JSON output format for mining results
//!
//! `--format json` implementation

use crate::search::{MiningReport, Pattern, SearchStats};
use serde::{Deserialize, Serialize};

/// A single mined pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPattern {
    /// Items of the pattern, sorted
    pub itemset: Vec<String>,
    /// Total utility across supporting transactions
    pub utility: f64,
    /// Average occupancy (0.0 to 1.0)
    pub occupancy: f64,
    /// Number of supporting transactions
    pub support: usize,
}

impl From<&Pattern> for JsonPattern {
    fn from(pattern: &Pattern) -> Self {
        Self {
            itemset: pattern.itemset().iter().map(|i| i.to_string()).collect(),
            utility: pattern.utility(),
            occupancy: pattern.occupancy(),
            support: pattern.support(),
        }
    }
}

/// Search counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonStats {
    pub transactions: usize,
    pub items: usize,
    pub candidates: usize,
    pub nodes_explored: u64,
    pub prunings_twu: u64,
    pub max_depth: u64,
    pub elapsed_us: u64,
}

impl From<&SearchStats> for JsonStats {
    fn from(stats: &SearchStats) -> Self {
        Self {
            transactions: stats.transactions,
            items: stats.items_total,
            candidates: stats.candidates,
            nodes_explored: stats.nodes_explored,
            prunings_twu: stats.prunings_twu,
            max_depth: stats.max_depth,
            elapsed_us: stats.elapsed.as_micros() as u64,
        }
    }
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub min_util: f64,
    pub min_occ: f64,
    /// `false` when the run was interrupted or hit `max_patterns`
    pub complete: bool,
    pub patterns: Vec<JsonPattern>,
    /// Search counters (if --stats enabled)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<JsonStats>,
}

impl JsonOutput {
    pub fn new(min_util: f64, min_occ: f64) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "huopm-json-v1".to_string(),
            min_util,
            min_occ,
            complete: true,
            patterns: Vec::new(),
            stats: None,
        }
    }

    pub fn add_pattern(&mut self, pattern: &Pattern) {
        self.patterns.push(JsonPattern::from(pattern));
    }

    /// Fill the document from a mining report
    pub fn set_report(&mut self, patterns: &[Pattern], report: &MiningReport, with_stats: bool) {
        self.complete = report.is_complete();
        for pattern in patterns {
            self.add_pattern(pattern);
        }
        if with_stats {
            self.stats = Some(JsonStats::from(&report.stats));
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
