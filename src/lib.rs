//! huopm - High utility occupancy pattern mining
//!
//! This library mines itemsets from quantitative transaction databases that
//! are both valuable (total utility >= min_util) and dominant within the
//! transactions they occur in (average occupancy >= min_occ). The search is a
//! depth-first walk of the itemset lattice pruned by transaction-weighted
//! utility bounds.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod input;
pub mod json_output;
pub mod model;
pub mod occupancy;
pub mod search;
pub mod twu;
pub mod utility;

pub use error::{MiningError, Result};
pub use search::{mine, Miner, MiningReport, Pattern};
