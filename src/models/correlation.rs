use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::CorrelationSample;
use crate::models::classification::{CorrelationBand, classify_correlation};
use crate::models::series_stats::{SeriesStats, StatsError, compute_series_stats};

/// One analysed ticker pair. (A, B) and (B, A) are the same relationship.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PairCorrelation {
    pub ticker_a: String,
    pub ticker_b: String,
    pub correlation: f64,
    /// Average price as reported by the data source
    pub average_a: f64,
    pub average_b: f64,
    pub stats_a: SeriesStats,
    pub stats_b: SeriesStats,
    /// Signature of the provider that served the pair (empty when unknown)
    #[serde(default)]
    pub source: String,
}

impl PairCorrelation {
    /// Bare pair with known stats, mostly useful when the stats came from elsewhere
    pub fn new(
        ticker_a: impl Into<String>,
        ticker_b: impl Into<String>,
        correlation: f64,
        stats_a: SeriesStats,
        stats_b: SeriesStats,
    ) -> Self {
        PairCorrelation {
            ticker_a: ticker_a.into(),
            ticker_b: ticker_b.into(),
            correlation,
            average_a: stats_a.mean,
            average_b: stats_b.mean,
            stats_a,
            stats_b,
            source: String::new(),
        }
    }

    /// Reuse the provider's coefficient, derive per-series stats locally.
    pub fn from_sample(sample: &CorrelationSample) -> Result<Self, StatsError> {
        let stats_a = compute_series_stats(&sample.series_a.prices())?;
        let stats_b = compute_series_stats(&sample.series_b.prices())?;
        Ok(PairCorrelation {
            ticker_a: sample.ticker_a.clone(),
            ticker_b: sample.ticker_b.clone(),
            correlation: sample.correlation,
            average_a: sample.series_a.average_price,
            average_b: sample.series_b.average_price,
            stats_a,
            stats_b,
            source: sample.source.clone(),
        })
    }

    pub fn band(&self) -> CorrelationBand {
        classify_correlation(self.correlation)
    }

    /// Does this pair describe the relationship between `a` and `b` (either order)?
    pub fn involves(&self, a: &str, b: &str) -> bool {
        (self.ticker_a == a && self.ticker_b == b) || (self.ticker_a == b && self.ticker_b == a)
    }
}

/// All C(n, 2) unordered pairs (i, j) with i < j, in selection order.
/// Never (i, i), never both (i, j) and (j, i).
pub fn unique_pairs<S: AsRef<str>>(tickers: &[S]) -> Vec<(String, String)> {
    tickers
        .iter()
        .map(|t| t.as_ref().to_string())
        .tuple_combinations()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PricePoint, StockData};
    use crate::utils::maths_utils::pair_count;
    use chrono::{DateTime, Duration};

    fn series(prices: &[f64]) -> StockData {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let price_history: Vec<PricePoint> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(p, start + Duration::minutes(5 * i as i64)))
            .collect();
        StockData {
            average_price: prices.iter().sum::<f64>() / prices.len() as f64,
            price_history,
        }
    }

    #[test]
    fn test_pair_count_matches_n_choose_2() {
        let tickers = ["AAPL", "MSFT", "NVDA", "TSLA", "AMZN", "GOOGL", "META", "PYPL"];
        for n in 0..=tickers.len() {
            assert_eq!(unique_pairs(&tickers[..n]).len(), pair_count(n));
        }
        assert_eq!(unique_pairs(&tickers[..4]).len(), 6);
        assert_eq!(unique_pairs(&tickers).len(), 28);
    }

    #[test]
    fn test_pairs_are_ordered_and_unique() {
        let pairs = unique_pairs(&["A", "B", "C"]);
        assert_eq!(
            pairs,
            vec![
                ("A".to_string(), "B".to_string()),
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string()),
            ]
        );
        assert!(pairs.iter().all(|(a, b)| a != b));
    }

    #[test]
    fn test_from_sample() {
        let sample = CorrelationSample {
            ticker_a: "AAPL".to_string(),
            ticker_b: "MSFT".to_string(),
            correlation: 0.82,
            series_a: series(&[10.0, 20.0]),
            series_b: series(&[5.0, 5.0, 5.0]),
            source: "Backend REST API".to_string(),
        };
        let pair = PairCorrelation::from_sample(&sample).unwrap();
        assert_eq!(pair.correlation, 0.82);
        assert!((pair.stats_a.sample_std_dev - 50f64.sqrt()).abs() < 1e-9);
        assert_eq!(pair.stats_b.sample_std_dev, 0.0);
        assert_eq!(pair.average_a, 15.0);
        assert_eq!(pair.source, "Backend REST API");
        assert_eq!(pair.band(), CorrelationBand::StrongPositive);
        assert!(pair.involves("MSFT", "AAPL"));
        assert!(!pair.involves("AAPL", "NVDA"));
    }

    #[test]
    fn test_from_sample_single_point_series() {
        let sample = CorrelationSample {
            ticker_a: "AAPL".to_string(),
            ticker_b: "MSFT".to_string(),
            correlation: 0.1,
            series_a: series(&[10.0]),
            series_b: series(&[5.0, 6.0]),
            source: "Backend REST API".to_string(),
        };
        assert!(matches!(
            PairCorrelation::from_sample(&sample),
            Err(StatsError::InsufficientData { actual: 1, .. })
        ));
    }
}
