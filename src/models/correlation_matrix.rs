//! Square, symmetric correlation table with a unit diagonal.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::models::correlation::{PairCorrelation, unique_pairs};

/// Value of an off-diagonal cell nobody supplied a correlation for
pub const MISSING_CELL_VALUE: f64 = 0.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RawCorrelationMatrix")]
pub struct CorrelationMatrix {
    tickers: Vec<String>,
    /// Row-major, `tickers.len()` squared
    values: Vec<f64>,
    /// Which cells were written from a pair (diagonal counts as observed)
    observed: Vec<bool>,
}

/// Unchecked wire form; only becomes a `CorrelationMatrix` through `try_from`
#[derive(Deserialize)]
struct RawCorrelationMatrix {
    tickers: Vec<String>,
    values: Vec<f64>,
    observed: Vec<bool>,
}

impl TryFrom<RawCorrelationMatrix> for CorrelationMatrix {
    type Error = String;

    /// Same guarantees as `build_correlation_matrix`: unique tickers, n x n cells,
    /// unit (observed) diagonal, symmetric values and mask.
    fn try_from(raw: RawCorrelationMatrix) -> Result<Self, Self::Error> {
        let n = raw.tickers.len();
        if raw.tickers.iter().unique().count() != n {
            return Err("correlation matrix has repeated tickers".to_string());
        }
        if raw.values.len() != n * n || raw.observed.len() != n * n {
            return Err(format!(
                "correlation matrix for {} tickers needs {} cells, got {} values and {} flags",
                n,
                n * n,
                raw.values.len(),
                raw.observed.len()
            ));
        }

        let matrix = CorrelationMatrix {
            tickers: raw.tickers,
            values: raw.values,
            observed: raw.observed,
        };
        if !matrix.has_unit_diagonal() || !(0..n).all(|i| matrix.observed[i * n + i]) {
            return Err("correlation matrix diagonal must be 1.0".to_string());
        }
        let mask_symmetric =
            (0..n).all(|i| (0..n).all(|j| matrix.observed[i * n + j] == matrix.observed[j * n + i]));
        if !matrix.is_symmetric() || !mask_symmetric {
            return Err("correlation matrix is not symmetric".to_string());
        }
        Ok(matrix)
    }
}

/// Diagonal 1.0, everything else 0.0, then each pair overwrites both [A][B]
/// and [B][A] (last write wins for repeated pairs).
///
/// Repeated tickers collapse onto their first position. Pairs that name a
/// ticker outside the set, or the same ticker twice, are skipped.
pub fn build_correlation_matrix<S: AsRef<str>>(
    tickers: &[S],
    pairs: &[PairCorrelation],
) -> CorrelationMatrix {
    let tickers: Vec<String> = tickers
        .iter()
        .map(|t| t.as_ref().to_string())
        .unique()
        .collect();
    let n = tickers.len();

    let mut matrix = CorrelationMatrix {
        values: vec![MISSING_CELL_VALUE; n * n],
        observed: vec![false; n * n],
        tickers,
    };
    for i in 0..n {
        matrix.values[i * n + i] = 1.0;
        matrix.observed[i * n + i] = true;
    }

    for pair in pairs {
        let (Some(a), Some(b)) = (matrix.index_of(&pair.ticker_a), matrix.index_of(&pair.ticker_b))
        else {
            log::warn!(
                "Skipping correlation {}/{}: ticker not in the analysed set",
                pair.ticker_a,
                pair.ticker_b
            );
            continue;
        };
        if a == b {
            log::warn!(
                "Skipping self-correlation entry for {} (diagonal is always 1.0)",
                pair.ticker_a
            );
            continue;
        }
        matrix.set_symmetric(a, b, pair.correlation);
    }

    matrix
}

impl CorrelationMatrix {
    fn index_of(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    fn set_symmetric(&mut self, a: usize, b: usize, value: f64) {
        let n = self.tickers.len();
        self.values[a * n + b] = value;
        self.values[b * n + a] = value;
        self.observed[a * n + b] = true;
        self.observed[b * n + a] = true;
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Cell value, `None` if either ticker is not part of the matrix.
    /// Missing pairs read as 0.0; use [`Self::is_observed`] to tell them apart.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let (i, j) = (self.index_of(a)?, self.index_of(b)?);
        Some(self.values[i * self.len() + j])
    }

    pub fn is_observed(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(i), Some(j)) => self.observed[i * self.len() + j],
            _ => false,
        }
    }

    /// Like `get`, but `None` for cells that were never supplied
    pub fn observed_value(&self, a: &str, b: &str) -> Option<f64> {
        if self.is_observed(a, b) {
            self.get(a, b)
        } else {
            None
        }
    }

    pub fn row(&self, ticker: &str) -> Option<&[f64]> {
        let i = self.index_of(ticker)?;
        let n = self.len();
        Some(&self.values[i * n..(i + 1) * n])
    }

    /// Rows in ticker order, each paired with its ticker
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> {
        let n = self.len();
        self.tickers
            .iter()
            .enumerate()
            .map(move |(i, t)| (t.as_str(), &self.values[i * n..(i + 1) * n]))
    }

    /// Pairs (i < j) that no correlation was supplied for
    pub fn missing_pairs(&self) -> Vec<(String, String)> {
        unique_pairs(&self.tickers)
            .into_iter()
            .filter(|(a, b)| !self.is_observed(a, b))
            .collect()
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| (0..n).all(|j| self.values[i * n + j] == self.values[j * n + i]))
    }

    pub fn has_unit_diagonal(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| self.values[i * n + i] == 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::series_stats::SeriesStats;

    fn pair(a: &str, b: &str, correlation: f64) -> PairCorrelation {
        let stats = SeriesStats {
            mean: 100.0,
            sample_std_dev: 1.0,
        };
        PairCorrelation::new(a, b, correlation, stats, stats)
    }

    #[test]
    fn test_three_ticker_matrix() {
        let pairs = vec![pair("A", "B", 0.5), pair("A", "C", -0.2), pair("B", "C", 0.9)];
        let matrix = build_correlation_matrix(&["A", "B", "C"], &pairs);

        assert_eq!(matrix.len(), 3);
        for t in ["A", "B", "C"] {
            assert_eq!(matrix.get(t, t), Some(1.0));
        }
        assert_eq!(matrix.get("A", "B"), Some(0.5));
        assert_eq!(matrix.get("B", "A"), Some(0.5));
        assert_eq!(matrix.get("A", "C"), Some(-0.2));
        assert_eq!(matrix.get("C", "A"), Some(-0.2));
        assert_eq!(matrix.get("B", "C"), Some(0.9));
        assert_eq!(matrix.get("C", "B"), Some(0.9));
        assert!(matrix.is_symmetric());
        assert!(matrix.has_unit_diagonal());
        assert!(matrix.missing_pairs().is_empty());
    }

    #[test]
    fn test_missing_pairs_default_to_zero() {
        let matrix = build_correlation_matrix(&["A", "B", "C"], &[pair("B", "A", 0.4)]);
        assert_eq!(matrix.get("A", "B"), Some(0.4));
        assert_eq!(matrix.get("A", "C"), Some(0.0));
        assert!(!matrix.is_observed("A", "C"));
        assert_eq!(matrix.observed_value("C", "A"), None);
        assert_eq!(matrix.observed_value("B", "A"), Some(0.4));
        assert_eq!(
            matrix.missing_pairs(),
            vec![
                ("A".to_string(), "C".to_string()),
                ("B".to_string(), "C".to_string())
            ]
        );
    }

    #[test]
    fn test_last_write_wins() {
        let pairs = vec![pair("A", "B", 0.1), pair("B", "A", -0.6)];
        let matrix = build_correlation_matrix(&["A", "B"], &pairs);
        assert_eq!(matrix.get("A", "B"), Some(-0.6));
        assert_eq!(matrix.get("B", "A"), Some(-0.6));
    }

    #[test]
    fn test_unknown_and_self_pairs_are_ignored() {
        let pairs = vec![pair("A", "Z", 0.8), pair("A", "A", 0.3)];
        let matrix = build_correlation_matrix(&["A", "B"], &pairs);
        assert_eq!(matrix.get("A", "A"), Some(1.0));
        assert_eq!(matrix.get("A", "B"), Some(0.0));
        assert_eq!(matrix.get("A", "Z"), None);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn test_duplicate_tickers_collapse() {
        let matrix = build_correlation_matrix(&["A", "B", "A"], &[pair("A", "B", 0.2)]);
        assert_eq!(matrix.tickers(), &["A", "B"]);
        assert_eq!(matrix.row("A"), Some(&[1.0, 0.2][..]));
    }

    #[test]
    fn test_build_is_idempotent() {
        let tickers = ["AAPL", "MSFT", "NVDA", "TSLA"];
        let pairs = vec![pair("AAPL", "MSFT", 0.71), pair("NVDA", "TSLA", -0.45)];
        let first = build_correlation_matrix(&tickers, &pairs);
        let second = build_correlation_matrix(&tickers, &pairs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let matrix = build_correlation_matrix(&["A", "B"], &[pair("A", "B", 0.3)]);
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(serde_json::from_str::<CorrelationMatrix>(&json).unwrap(), matrix);

        let rejected = [
            // too few cells
            r#"{"tickers":["A","B"],"values":[1.0],"observed":[true]}"#,
            // mask length off
            r#"{"tickers":["A","B"],"values":[1.0,0.0,0.0,1.0],"observed":[true,false,false]}"#,
            // diagonal not 1.0
            r#"{"tickers":["A","B"],"values":[0.5,0.0,0.0,1.0],"observed":[true,false,false,true]}"#,
            // asymmetric values
            r#"{"tickers":["A","B"],"values":[1.0,0.2,0.4,1.0],"observed":[true,true,true,true]}"#,
            // asymmetric mask
            r#"{"tickers":["A","B"],"values":[1.0,0.2,0.2,1.0],"observed":[true,true,false,true]}"#,
            // repeated ticker
            r#"{"tickers":["A","A"],"values":[1.0,0.0,0.0,1.0],"observed":[true,false,false,true]}"#,
        ];
        for json in rejected {
            assert!(
                serde_json::from_str::<CorrelationMatrix>(json).is_err(),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = build_correlation_matrix::<&str>(&[], &[]);
        assert!(matrix.is_empty());
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.rows().count(), 0);
    }
}
