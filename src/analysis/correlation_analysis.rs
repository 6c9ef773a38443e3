use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::analysis::AnalysisError;
use crate::data::CorrelationProvider;
use crate::data::demo::DEMO_SIGNATURE;
use crate::domain::{TickerSelection, TimeRange};
use crate::models::{CorrelationMatrix, PairCorrelation, build_correlation_matrix, unique_pairs};
use crate::utils::maths_utils::pair_count;

/// A pair that could not be analysed, and why
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PairFailure {
    pub ticker_a: String,
    pub ticker_b: String,
    pub reason: String,
}

/// Result of one "Analyze" run over a ticker selection
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorrelationReport {
    pub tickers: Vec<String>,
    pub range: TimeRange,
    /// Successful pairs in enumeration order
    pub pairs: Vec<PairCorrelation>,
    pub matrix: CorrelationMatrix,
    pub failures: Vec<PairFailure>,
}

impl CorrelationReport {
    pub fn requested_pairs(&self) -> usize {
        self.pairs.len() + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn pair(&self, a: &str, b: &str) -> Option<&PairCorrelation> {
        self.pairs.iter().find(|p| p.involves(a, b))
    }

    /// Pairs served by the demo generator (e.g. after a backend failure), not by real data
    pub fn synthetic_pairs(&self) -> Vec<&PairCorrelation> {
        self.pairs
            .iter()
            .filter(|p| p.source == DEMO_SIGNATURE)
            .collect()
    }

    pub fn is_synthetic(&self, a: &str, b: &str) -> bool {
        self.pair(a, b).is_some_and(|p| p.source == DEMO_SIGNATURE)
    }
}

async fn analyze_pair<P: CorrelationProvider + ?Sized>(
    provider: &P,
    ticker_a: &str,
    ticker_b: &str,
    range: TimeRange,
) -> Result<PairCorrelation, AnalysisError> {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_pair_requests {
        log::debug!("Requesting {}/{} over {}", ticker_a, ticker_b, range);
    }
    let sample = provider.fetch_correlation(ticker_a, ticker_b, range).await?;
    Ok(PairCorrelation::from_sample(&sample)?)
}

/// Requests every C(n, 2) pair of the selection concurrently and assembles
/// the matrix from whatever came back. A failed pair is logged and left out
/// (its cells stay at the 0.0 default); it never aborts the run.
pub async fn analyze_correlations<P: CorrelationProvider + ?Sized>(
    provider: &P,
    selection: &TickerSelection,
    range: TimeRange,
) -> CorrelationReport {
    let start = Instant::now();
    let requested = unique_pairs(selection.tickers());
    debug_assert_eq!(requested.len(), pair_count(selection.len()));
    log::info!(
        "Analysing {} tickers over {}: {} pair requests",
        selection.len(),
        range,
        requested.len()
    );

    let results = join_all(
        requested
            .iter()
            .map(|(a, b)| analyze_pair(provider, a, b, range)),
    )
    .await;

    let mut pairs = Vec::with_capacity(requested.len());
    let mut failures = Vec::new();
    for ((ticker_a, ticker_b), result) in requested.into_iter().zip(results) {
        match result {
            Ok(pair) => pairs.push(pair),
            Err(e) => {
                log::warn!("Error fetching correlation for {}-{}: {}", ticker_a, ticker_b, e);
                failures.push(PairFailure {
                    ticker_a,
                    ticker_b,
                    reason: e.to_string(),
                });
            }
        }
    }

    let synthetic = pairs.iter().filter(|p| p.source == DEMO_SIGNATURE).count();
    if synthetic > 0 && synthetic < pairs.len() {
        log::warn!(
            "{} of {} pairs are demo data mixed into real results",
            synthetic,
            pairs.len()
        );
    }

    let matrix = build_correlation_matrix(selection.tickers(), &pairs);
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_matrix {
        log::debug!("Correlation matrix: {:?}", matrix);
    }

    log::info!(
        "Correlation analysis finished in {:?}: {} ok, {} failed",
        start.elapsed(),
        pairs.len(),
        failures.len()
    );

    CorrelationReport {
        tickers: selection.tickers().to_vec(),
        range,
        pairs,
        matrix,
        failures,
    }
}
