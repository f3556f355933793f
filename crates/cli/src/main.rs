//! Terminal adapter for the portfolio tracker core: argument parsing,
//! stdin token prompts, a JSON file store, and table printing. All
//! portfolio logic lives in `portfolio-tracker-core`.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};

use portfolio_tracker_core::auth::{StoredCredentials, TokenPrompt};
use portfolio_tracker_core::config::Market;
use portfolio_tracker_core::models::stock::SortField;
use portfolio_tracker_core::providers::http::{IntervalPacer, ReqwestGateway};
use portfolio_tracker_core::services::refresh_service::RefreshService;
use portfolio_tracker_core::storage::cache::CacheStore;
use portfolio_tracker_core::storage::kv::FileStore;
use portfolio_tracker_core::view::TableView;
use portfolio_tracker_core::{PortfolioTracker, RefreshStatus};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MarketArg {
    Brazil,
    Us,
}

impl From<MarketArg> for Market {
    fn from(arg: MarketArg) -> Self {
        match arg {
            MarketArg::Brazil => Market::Brazil,
            MarketArg::Us => Market::Us,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Total,
    Price,
    Units,
    Pl,
    Lpa,
    Pvpa,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Total => SortField::Total,
            SortArg::Price => SortField::Price,
            SortArg::Units => SortField::Units,
            SortArg::Pl => SortField::Pl,
            SortArg::Lpa => SortField::Lpa,
            SortArg::Pvpa => SortField::Pvpa,
        }
    }
}

/// Fetch B3/US portfolio quotes and print a sortable position table.
#[derive(Debug, Parser)]
#[command(name = "portfolio-tracker", version)]
struct Args {
    /// Market to display
    #[arg(long, value_enum, default_value_t = MarketArg::Brazil)]
    market: MarketArg,

    /// Column to sort by
    #[arg(long, value_enum, default_value_t = SortArg::Total)]
    sort: SortArg,

    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,

    /// Path of the JSON file holding tokens and cached quotes
    #[arg(long, default_value = "portfolio-tracker.json")]
    store: PathBuf,

    /// Prompt for a fresh API token before fetching
    #[arg(long)]
    update_token: bool,
}

/// Token prompt over stderr/stdin.
struct StdinPrompt;

impl TokenPrompt for StdinPrompt {
    fn request(&self, message: &str) -> Option<String> {
        eprint!("{message} ");
        std::io::stderr().flush().ok()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).ok()?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

fn print_table(view: &TableView) {
    println!(
        "{:>3}  {:<8} {:>6} {:>14} {:>16} {:>8} {:>8} {:>8}",
        "#", "TICKER", "UNITS", "PRICE", "TOTAL", "P/L", "LPA", "P/VPA"
    );
    for row in &view.rows {
        println!(
            "{:>3}  {:<8} {:>6} {:>14} {:>16} {:>8} {:>8} {:>8}",
            row.position, row.ticker, row.units, row.price, row.total, row.p_l, row.lpa, row.p_vpa
        );
    }
    println!();
    println!("Tickers: {}   Total: {}", view.ticker_count, view.summary_total);
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let market: Market = args.market.into();

    let store = match FileStore::open(&args.store) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Cannot open store {}: {e}", args.store.display());
            return ExitCode::FAILURE;
        }
    };

    let credentials = Arc::new(StoredCredentials::new(store.clone(), Box::new(StdinPrompt)));
    if args.update_token {
        if let Some(token) = StdinPrompt.request(market.config().update_token_prompt) {
            credentials.replace(market, &token);
        }
    }

    let refresher = RefreshService::new(
        Arc::new(ReqwestGateway::new()),
        CacheStore::new(store),
        credentials,
        Arc::new(IntervalPacer::default()),
    );

    let mut tracker = PortfolioTracker::new(refresher, market);
    let sort: SortField = args.sort.into();
    if sort != SortField::Total {
        tracker.toggle_sort(sort);
    }
    if args.desc {
        tracker.toggle_sort(sort);
    }

    match tracker.refresh().await {
        Ok(RefreshStatus::NoCredentials) => {
            eprintln!("No API token provided; nothing fetched.");
            ExitCode::SUCCESS
        }
        Ok(_) => {
            print_table(&tracker.render());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Fetch error: {e}");
            eprintln!("Could not load {market} quotes: {e}");
            ExitCode::FAILURE
        }
    }
}
