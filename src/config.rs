//! Mining configuration
//!
//! Thresholds and reporting options, loadable from TOML:
//!
//! ```toml
//! min_util = 12.0
//! min_occ = 0.4
//! sort = "utility"
//! max_patterns = 1000
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use crate::error::{MiningError, Result};
use crate::search::SortOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Thresholds and reporting options for one mining run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MiningConfig {
    /// Minimum total utility a pattern must reach. Must be finite and > 0.
    ///
    /// Also the pruning bound: items and itemsets whose TWU is below this
    /// value are never extended.
    pub min_util: f64,

    /// Minimum average occupancy, in `[0, 1]`
    ///
    /// 0.0 (default) disables the occupancy filter; 1.0 keeps only itemsets
    /// that make up every transaction they appear in.
    pub min_occ: f64,

    /// Order of the reported patterns
    pub sort: SortOrder,

    /// Stop the search after this many patterns (`None` = unlimited)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_patterns: Option<usize>,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_util: 1.0,
            min_occ: 0.0,
            sort: SortOrder::Itemset,
            max_patterns: None,
        }
    }
}

impl MiningConfig {
    /// Load a configuration from a TOML file and validate it
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid mining configuration in {}", path.display()))
    }

    /// Parse a configuration from TOML content and validate it
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Check threshold ranges
    ///
    /// # Errors
    /// `InvalidThreshold` when `min_util` is not a positive finite number,
    /// `min_occ` lies outside `[0, 1]`, or `max_patterns` is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.min_util.is_finite() || self.min_util <= 0.0 {
            return Err(MiningError::InvalidThreshold(format!(
                "min_util must be a positive number, got {}",
                self.min_util
            )));
        }

        if !(0.0..=1.0).contains(&self.min_occ) {
            return Err(MiningError::InvalidThreshold(format!(
                "min_occ must be in [0, 1], got {}",
                self.min_occ
            )));
        }

        if self.max_patterns == Some(0) {
            return Err(MiningError::InvalidThreshold(
                "max_patterns must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}
