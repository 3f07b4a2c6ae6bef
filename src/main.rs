use anyhow::Result;
use clap::Parser;
use huopm::cli::{Cli, OutputFormat};
use huopm::config::MiningConfig;
use huopm::csv_output::CsvOutput;
use huopm::input;
use huopm::json_output::JsonOutput;
use huopm::search::{top_patterns, Miner, MiningReport, Pattern};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Merge the optional config file with command-line overrides
fn build_config(args: &Cli) -> Result<MiningConfig> {
    if args.min_util.is_none() && args.config.is_none() {
        anyhow::bail!("Missing minimum utility. Usage: huopm -d DATABASE --min-util UTIL [--min-occ OCC]");
    }

    let mut config = match &args.config {
        Some(path) => MiningConfig::from_file(path)?,
        None => MiningConfig::default(),
    };

    if let Some(min_util) = args.min_util {
        config.min_util = min_util;
    }
    if let Some(min_occ) = args.min_occ {
        config.min_occ = min_occ;
    }
    if let Some(sort) = args.sort {
        config.sort = sort;
    }
    if args.max_patterns.is_some() {
        config.max_patterns = args.max_patterns;
    }

    config.validate()?;
    Ok(config)
}

/// Print patterns one per line, followed by the statistics block if requested
fn print_text(patterns: &[Pattern], report: &MiningReport, show_stats: bool) {
    if patterns.is_empty() {
        println!("No patterns found.");
    }
    for pattern in patterns {
        println!("{}", pattern);
    }

    if show_stats {
        println!();
        println!("=== Search Statistics ===");
        println!("{}", report.stats);
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = build_config(&args)?;

    let loaded = input::load_database(&args.database)?;
    let profits = match (&args.profits, loaded.profits) {
        (Some(path), _) => input::load_profits(path)?,
        (None, Some(embedded)) => embedded,
        (None, None) => {
            anyhow::bail!(
                "No profit table. Pass --profits FILE or embed \"profits\" in a JSON database."
            );
        }
    };

    let report = Miner::new(config.clone()).run(&loaded.database, &profits)?;
    if !report.is_complete() {
        eprintln!("warning: search stopped early: {}", report.termination);
    }

    let patterns = match args.top {
        Some(k) => top_patterns(&report.patterns, k, config.sort),
        None => report.patterns.clone(),
    };

    match args.format {
        OutputFormat::Text => print_text(&patterns, &report, args.stats),
        OutputFormat::Json => {
            let mut output = JsonOutput::new(config.min_util, config.min_occ);
            output.set_report(&patterns, &report, args.stats);
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => {
            let mut output = CsvOutput::new(true);
            for pattern in &patterns {
                output.add_pattern(pattern);
            }
            print!("{}", output.to_csv());
            if args.stats {
                eprintln!("{}", report.stats);
            }
        }
    }

    Ok(())
}
