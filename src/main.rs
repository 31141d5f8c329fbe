use anyhow::Result;
use colored::Colorize;
use std::sync::Arc;

use option_scanner::models::{OptionClass, ScanSpec};
use option_scanner::{config, logging, report, scanner, YahooClient};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let spec = match build_spec_from_env() {
        Some(spec) => spec,
        None => {
            eprintln!("Set SCAN_SYMBOL (and optionally SCAN_CLASS) to control the scan");
            eprintln!("Examples:");
            eprintln!("  SCAN_SYMBOL=AAPL SCAN_CLASS=put SCAN_DELTA=0.30 cargo run");
            eprintln!("  SCAN_SYMBOL=SPY SCAN_CLASS=call SCAN_DELTA=0.50 SCAN_TOLERANCE=0.10 cargo run");
            eprintln!("  SCAN_SYMBOL=TSLA SCAN_MIN_ROC=2.0 SCAN_MAX_DAYS=30 SCAN_MIN_DAYS=7 cargo run");
            eprintln!("Other knobs: SCAN_RATE (risk-free rate, default 0.045)");
            std::process::exit(1);
        }
    };

    println!("{}", "=".repeat(60).blue());
    println!("{}", "Option Delta Scanner".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!();
    println!(
        "{} Scanning {} for {}s with delta ~{} and min ROC {}%",
        "→".cyan(),
        spec.symbol.yellow(),
        spec.option_class.as_str().yellow(),
        spec.target_delta,
        spec.min_roc_pct
    );
    println!(
        "{} Expiry window: {} to {} days",
        "→".cyan(),
        spec.min_days,
        spec.max_days
    );
    println!();

    let client = Arc::new(YahooClient::new()?);

    // Step 1: Fetch spot + option chains for every expiry in the window
    println!("{}", "Step 1: Fetching option chain...".cyan());
    let (spot, contracts) = match client
        .fetch_contracts(&spec.symbol, spec.min_days, spec.max_days)
        .await
    {
        Ok(res) => res,
        Err(e) => {
            println!(
                "{} Could not fetch chain data for {}: {}",
                "✗".red(),
                spec.symbol.yellow(),
                e
            );
            println!("{} 0 matches (no usable chain data)", "ℹ".blue());
            return Ok(());
        }
    };

    if spot <= 0.0 {
        println!(
            "{} No usable spot price for {} (got {})",
            "✗".red(),
            spec.symbol.yellow(),
            spot
        );
        println!("{} 0 matches (no usable chain data)", "ℹ".blue());
        return Ok(());
    }

    println!("{} Current price for {}: ${:.2}", "✓".green(), spec.symbol.yellow(), spot);
    println!("{} Fetched {} contract rows", "✓".green(), contracts.len());
    println!();

    // Step 2: Scan
    println!("{}", "Step 2: Scanning...".cyan());
    let target = scanner::effective_target_delta(&spec);
    println!(
        "{} Filtering for delta between {:.3} and {:.3} with min ROC {}%",
        "ℹ".blue(),
        target - spec.delta_tolerance,
        target + spec.delta_tolerance,
        spec.min_roc_pct
    );

    let outcome = scanner::scan(&contracts, spot, &spec)?;
    println!();

    // Step 3: Report
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Results".cyan().bold());
    println!("{}", "=".repeat(60).blue());
    println!("{} Contracts considered: {}", "ℹ".blue(), outcome.considered);
    println!("{} Matches found: {}", "ℹ".blue(), outcome.matches.len());
    println!();

    if outcome.matches.is_empty() {
        if outcome.considered == 0 {
            println!("{} No contracts inside the expiry window", "ℹ".blue());
        } else {
            println!("{} No matches found with current criteria", "ℹ".blue());
        }
    } else {
        report::print_matches(&outcome.matches);
        println!();

        let filename = report::save_csv(&spec, &outcome.matches)?;
        println!("{} Saved {} matches to {}", "✓".green(), outcome.matches.len(), filename);
    }

    println!();
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Done!".green().bold());
    println!("{}", "=".repeat(60).blue());

    Ok(())
}

/// Build the scan spec from environment variables. Only the symbol and a
/// recognizable option class are hard requirements; everything else
/// falls back to defaults.
fn build_spec_from_env() -> Option<ScanSpec> {
    let symbol = config::get_symbol()?;
    let option_class = OptionClass::parse(&config::get_option_class())?;

    let mut spec = ScanSpec::new(symbol, option_class, config::get_target_delta());
    spec.delta_tolerance = config::get_delta_tolerance();
    spec.min_roc_pct = config::get_min_roc();
    spec.max_days = config::get_max_days();
    spec.min_days = config::get_min_days();
    spec.risk_free_rate = config::get_risk_free_rate();

    Some(spec)
}
