use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ANALYSIS;

/// Everything that can be wrong with what the user asked to analyse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("select at least {min} tickers (got {actual})")]
    TooFewTickers { min: usize, actual: usize },

    #[error("at most {max} tickers can be analysed together (got {actual})")]
    TooManyTickers { max: usize, actual: usize },

    #[error("ticker symbols cannot be blank")]
    BlankTicker,

    #[error("'{ticker}' is not a ticker symbol (letters, digits, '.' and '-' only)")]
    InvalidTicker { ticker: String },

    #[error("time range {minutes}m is outside {min}m..={max}m")]
    TimeRangeOutOfBounds { minutes: u32, min: u32, max: u32 },

    #[error("time range {minutes}m is not a multiple of {step}m")]
    TimeRangeOffStep { minutes: u32, step: u32 },
}

/// Symbols start with a letter or digit; after that '.' and '-' are allowed too ("BRK.B", "RDS-A")
fn is_ticker_symbol(ticker: &str) -> bool {
    let mut chars = ticker.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// Trim and upper-case a user supplied symbol ("  aapl" -> "AAPL").
/// Anything that could not be a symbol (and so could change a request URL) is rejected.
pub fn normalize_ticker(raw: &str) -> Result<String, SelectionError> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return Err(SelectionError::BlankTicker);
    }
    if !is_ticker_symbol(&ticker) {
        return Err(SelectionError::InvalidTicker { ticker });
    }
    Ok(ticker)
}

/// An ordered, duplicate-free set of tickers sized for correlation analysis.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TickerSelection {
    tickers: Vec<String>,
}

impl TickerSelection {
    /// Normalizes, drops repeats (first occurrence wins) and enforces the size limits.
    pub fn new<I, S>(raw: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: Vec<String> = raw
            .into_iter()
            .map(|s| normalize_ticker(s.as_ref()))
            .collect::<Result<_, _>>()?;
        let tickers: Vec<String> = normalized.into_iter().unique().collect();

        let limits = &ANALYSIS.selection;
        if tickers.len() < limits.min_tickers {
            return Err(SelectionError::TooFewTickers {
                min: limits.min_tickers,
                actual: tickers.len(),
            });
        }
        if tickers.len() > limits.max_tickers {
            return Err(SelectionError::TooManyTickers {
                max: limits.max_tickers,
                actual: tickers.len(),
            });
        }
        Ok(Self { tickers })
    }

    /// Default selection when the user names nothing: the head of the catalogue.
    pub fn default_from(catalogue_tickers: &[String]) -> Result<Self, SelectionError> {
        Self::new(
            catalogue_tickers
                .iter()
                .take(ANALYSIS.selection.default_ticker_count),
        )
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_normalizes_and_dedups() {
        let selection = TickerSelection::new([" aapl", "MSFT", "AAPL", "nvda "]).unwrap();
        assert_eq!(selection.tickers(), &["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn test_selection_limits() {
        assert_eq!(
            TickerSelection::new(["AAPL", "aapl"]),
            Err(SelectionError::TooFewTickers { min: 2, actual: 1 })
        );

        let nine = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];
        assert_eq!(
            TickerSelection::new(nine),
            Err(SelectionError::TooManyTickers { max: 8, actual: 9 })
        );
        assert!(TickerSelection::new(&nine[..8]).is_ok());
    }

    #[test]
    fn test_blank_ticker_rejected() {
        assert_eq!(
            TickerSelection::new(["AAPL", "  "]),
            Err(SelectionError::BlankTicker)
        );
    }

    #[test]
    fn test_symbol_charset() {
        assert_eq!(normalize_ticker("brk.b"), Ok("BRK.B".to_string()));
        assert_eq!(normalize_ticker("RDS-A"), Ok("RDS-A".to_string()));
        assert_eq!(normalize_ticker("7203"), Ok("7203".to_string()));

        for bad in ["AAPL?minutes=120", "../stockcorrelation", "A#B", "A/B", "..", "-X", "A B", "ÄPPL"] {
            assert!(
                matches!(normalize_ticker(bad), Err(SelectionError::InvalidTicker { .. })),
                "{} should be rejected",
                bad
            );
        }
        assert!(TickerSelection::new(["AAPL", "MSFT?x=1"]).is_err());
    }

    #[test]
    fn test_default_selection_takes_first_four() {
        let catalogue: Vec<String> = ["AAPL", "MSFT", "NVDA", "TSLA", "AMZN"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let selection = TickerSelection::default_from(&catalogue).unwrap();
        assert_eq!(selection.tickers(), &["AAPL", "MSFT", "NVDA", "TSLA"]);
    }
}
