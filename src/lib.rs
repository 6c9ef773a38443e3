#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use analysis::{AnalysisError, CorrelationReport, StockReport, analyze_correlations, analyze_stock};
pub use data::{DataError, DemoData, FallbackChain, HttpStockApi, MarketDataProvider};
pub use domain::{StockCatalog, TickerSelection, TimeRange};
pub use models::{
    CorrelationBand, CorrelationMatrix, SeriesStats, build_correlation_matrix,
    classify_correlation, compute_series_stats, unique_pairs,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::config::{ANALYSIS, ApiConfig};

// CLI argument parsing
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Stock prices and pairwise correlations from the market data backend", long_about = None)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, default_value = config::API.base_url)]
    pub base_url: String,

    /// Skip the backend and use generated demo data
    #[arg(long, global = true, default_value_t = false)]
    pub offline: bool,

    /// Seed the demo data generator (repeatable output)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the stocks on offer
    Stocks,
    /// Price summary and statistics for one ticker
    Stock {
        ticker: String,
        /// Time window in minutes (5..=120, multiple of 5)
        #[arg(long, default_value_t = ANALYSIS.time_range.default_minutes)]
        minutes: u32,
    },
    /// Pairwise correlation matrix; defaults to the first tickers of the catalogue
    Correlate {
        tickers: Vec<String>,
        /// Time window in minutes (5..=120, multiple of 5)
        #[arg(long, default_value_t = ANALYSIS.time_range.default_minutes)]
        minutes: u32,
    },
}

/// The provider stack the flags ask for: demo data alone when offline,
/// otherwise the backend with demo data behind it.
pub fn build_provider(cli: &Cli) -> anyhow::Result<Box<dyn MarketDataProvider>> {
    let demo = match cli.seed {
        Some(seed) => DemoData::seeded(seed),
        None => DemoData::new(),
    };
    if cli.offline {
        log::info!("Offline: using demo data only");
        return Ok(Box::new(demo));
    }

    let api = HttpStockApi::new(ApiConfig::with_base_url(&cli.base_url))
        .with_context(|| format!("Failed to build HTTP client for {}", cli.base_url))?;
    let chain = FallbackChain::with_demo_fallback(api, demo);
    log::info!("Data sources: {}", chain.signatures().join(" -> "));
    Ok(Box::new(chain))
}

/// Run one subcommand against `provider` and render its output
pub async fn run(cli: &Cli, provider: &dyn MarketDataProvider) -> anyhow::Result<String> {
    match &cli.command {
        Command::Stocks => {
            let catalog = provider
                .fetch_stock_catalog()
                .await
                .context("Failed to load the stock catalogue")?;
            if cli.json {
                let stocks: serde_json::Map<String, serde_json::Value> = catalog
                    .entries()
                    .iter()
                    .map(|(name, ticker)| (name.clone(), json!(ticker)))
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({ "stocks": stocks }))?)
            } else {
                Ok(catalog.to_string())
            }
        }

        Command::Stock { ticker, minutes } => {
            let range = TimeRange::new(*minutes)?;
            let report = analyze_stock(provider, ticker, range)
                .await
                .with_context(|| format!("Failed to analyse {}", ticker))?;
            if cli.json {
                Ok(serde_json::to_string_pretty(&report)?)
            } else {
                Ok(report.to_string())
            }
        }

        Command::Correlate { tickers, minutes } => {
            let range = TimeRange::new(*minutes)?;
            let selection = if tickers.is_empty() {
                let catalog = provider
                    .fetch_stock_catalog()
                    .await
                    .context("No tickers given and the stock catalogue could not be loaded")?;
                TickerSelection::default_from(&catalog.tickers())?
            } else {
                TickerSelection::new(tickers)?
            };

            let report = analyze_correlations(provider, &selection, range).await;
            if cli.json {
                let colors = crate::report::cell_colors(&report.matrix);
                Ok(serde_json::to_string_pretty(
                    &json!({ "report": report, "cellColors": colors }),
                )?)
            } else {
                Ok(report.to_string())
            }
        }
    }
}
