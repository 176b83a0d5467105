//! NSE options premium screener CLI
//!
//! Fetches derivative quotes per symbol, evaluates short-straddle and
//! covered-call opportunities, and prints both tables ranked by ROI.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colored::Colorize;
use tracing::{info, warn};

use nse_connector::{models, NseClient, LotSizeStore};
use options_screener::report::{
    self, SortBy, render_covered_calls, render_straddles, render_summary,
};
use options_screener::{
    CoveredCallOpportunity, StraddleOpportunity, evaluate_covered_call, evaluate_short_straddle,
    parse_options,
};
use services_common::Preferences;

const PREFERENCES_FILE: &str = "preferences.json";
const AUTO_REFRESH_SECS: u64 = 30;

#[derive(Debug, Parser)]
#[command(
    name = "options-screener",
    about = "Scan NSE stock options for short-straddle and covered-call premium"
)]
struct Args {
    /// Stocks to scan (comma separated); defaults to saved preferences
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Expiry months to consider, 3-letter tokens like "Dec"
    #[arg(long, value_delimiter = ',')]
    months: Vec<String>,

    /// Lower bound of the ATM band as a fraction of spot
    #[arg(long)]
    atm_lower: Option<f64>,

    /// Upper bound of the ATM band as a fraction of spot
    #[arg(long)]
    atm_upper: Option<f64>,

    /// Margin fraction required to sell one leg
    #[arg(long)]
    margin: Option<f64>,

    /// Sort order for both tables
    #[arg(long, value_enum)]
    sort: Option<SortBy>,

    /// Directory for the lot-size cache and preference file
    #[arg(long, default_value = "cache")]
    cache_dir: PathBuf,

    /// Re-run the scan every N seconds
    #[arg(long)]
    watch: Option<u64>,

    /// Persist the effective settings as the new preferences
    #[arg(long)]
    save_prefs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("options_screener=info,nse_connector=info")
        .init();

    let args = Args::parse();
    let prefs_path = args.cache_dir.join(PREFERENCES_FILE);
    let prefs = effective_preferences(&args, Preferences::load(&prefs_path));

    if args.save_prefs {
        prefs.save(&prefs_path).context("saving preferences")?;
        info!("Preferences saved to {}", prefs_path.display());
    }

    let client = NseClient::new().context("building NSE client")?;
    client.connect().await;

    let lots = LotSizeStore::load(&client, &args.cache_dir)
        .await
        .context("loading lot sizes")?;

    let refresh = args
        .watch
        .or_else(|| prefs.auto_refresh.then_some(AUTO_REFRESH_SECS));

    loop {
        run_scan(&client, &lots, &prefs).await;

        let Some(secs) = refresh else {
            break;
        };
        info!("Next scan in {secs}s");
        tokio::time::sleep(Duration::from_secs(secs)).await;
    }

    Ok(())
}

/// CLI flags override persisted preferences field by field
fn effective_preferences(args: &Args, saved: Preferences) -> Preferences {
    let mut prefs = saved;
    if !args.symbols.is_empty() {
        prefs.stock_list = args.symbols.clone();
    }
    if !args.months.is_empty() {
        prefs.chosen_months = args.months.clone();
    }
    if let Some(atm_lower) = args.atm_lower {
        prefs.atm_range_lower = atm_lower;
    }
    if let Some(atm_upper) = args.atm_upper {
        prefs.atm_range_upper = atm_upper;
    }
    if let Some(margin) = args.margin {
        prefs.margin = margin;
    }
    if let Some(sort) = args.sort {
        prefs.sort_by = match sort {
            SortBy::Roi => "ROI".to_string(),
            SortBy::Normal => "Normal".to_string(),
        };
    }
    if args.watch.is_some() {
        prefs.auto_refresh = true;
    }
    prefs
}

/// One full pass over the configured symbols
///
/// Any per-symbol failure is contained: the symbol contributes nothing
/// and the scan moves on.
async fn run_scan(client: &NseClient, lots: &LotSizeStore, prefs: &Preferences) {
    let sort_by = SortBy::from_preference(&prefs.sort_by);
    let mut straddles: Vec<StraddleOpportunity> = Vec::new();
    let mut covered_calls: Vec<CoveredCallOpportunity> = Vec::new();

    for (idx, symbol) in prefs.stock_list.iter().enumerate() {
        info!("Processing {symbol}... ({}/{})", idx + 1, prefs.stock_list.len());

        let records = match client.derivatives(symbol).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Skipping {symbol}: {e}");
                continue;
            }
        };

        let current_price = models::underlying_value(&records);
        if current_price == 0.0 {
            info!("Skipping {symbol}: spot price unavailable");
            continue;
        }

        let lot_size = match lots.get(symbol) {
            Ok(lot_size) => lot_size,
            Err(e) => {
                warn!("Skipping {symbol}: {e}");
                continue;
            }
        };

        let entries = parse_options(symbol, &records, None);

        match evaluate_short_straddle(
            symbol,
            current_price,
            lot_size,
            &entries,
            &prefs.chosen_months,
            prefs.atm_range_lower,
            prefs.atm_range_upper,
            prefs.margin,
        ) {
            Ok(found) => straddles.extend(found),
            Err(e) => warn!("Straddle evaluation failed for {symbol}: {e}"),
        }

        match evaluate_covered_call(
            symbol,
            current_price,
            lot_size,
            &entries,
            &prefs.chosen_months,
            prefs.atm_range_upper,
            prefs.margin,
        ) {
            Ok(found) => covered_calls.extend(found),
            Err(e) => warn!("Covered-call evaluation failed for {symbol}: {e}"),
        }
    }

    report::sort_straddles(&mut straddles, sort_by);
    report::sort_covered_calls(&mut covered_calls, sort_by);
    print_report(&straddles, &covered_calls);
}

fn print_report(straddles: &[StraddleOpportunity], covered_calls: &[CoveredCallOpportunity]) {
    println!();
    println!(
        "{} {}",
        "NSE Options Premium Scan".bold(),
        Local::now().format("%H:%M:%S")
    );

    println!("\n{}", "Strategy 1: Short Straddle".bold().underline());
    match report::summarize_straddles(straddles) {
        Some(summary) => {
            println!("{}", render_straddles(straddles));
            println!("{}", render_summary(&summary).green());
        }
        None => println!(
            "{}",
            "No straddle opportunities. Market may be closed or no suitable strikes available."
                .yellow()
        ),
    }

    println!("\n{}", "Strategy 2: Covered Call".bold().underline());
    match report::summarize_covered_calls(covered_calls) {
        Some(summary) => {
            println!("{}", render_covered_calls(covered_calls));
            println!("{}", render_summary(&summary).green());
        }
        None => println!("{}", "No covered call opportunities.".yellow()),
    }
}
