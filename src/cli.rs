//! CLI argument parsing for huopm

use crate::search::SortOrder;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for mined patterns
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "huopm")]
#[command(version)]
#[command(about = "High utility occupancy pattern mining", long_about = None)]
pub struct Cli {
    /// Transaction database (JSON or `item:qty` text lines)
    #[arg(short = 'd', long = "database", value_name = "FILE")]
    pub database: PathBuf,

    /// Unit profit table as a JSON object (overrides profits embedded in the database)
    #[arg(short = 'p', long = "profits", value_name = "FILE")]
    pub profits: Option<PathBuf>,

    /// TOML mining configuration; command-line thresholds take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum utility a pattern must reach (> 0)
    #[arg(short = 'u', long = "min-util", value_name = "UTIL")]
    pub min_util: Option<f64>,

    /// Minimum average occupancy a pattern must reach (0.0 to 1.0)
    #[arg(short = 'o', long = "min-occ", value_name = "OCC")]
    pub min_occ: Option<f64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Order of the reported patterns
    #[arg(long = "sort", value_enum)]
    pub sort: Option<SortOrder>,

    /// Report only the first K patterns after sorting
    #[arg(long = "top", value_name = "K")]
    pub top: Option<usize>,

    /// Stop the search after N patterns
    #[arg(long = "max-patterns", value_name = "N")]
    pub max_patterns: Option<usize>,

    /// Show search statistics (nodes explored, prunings, timing)
    #[arg(short = 's', long = "stats")]
    pub stats: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
