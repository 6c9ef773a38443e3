use serde::{Deserialize, Serialize};

use crate::config::DEMO;

/// Company name -> ticker, in the order the source listed them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StockCatalog {
    entries: Vec<(String, String)>,
}

impl StockCatalog {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// The hard-coded list used when the backend is unreachable
    pub fn demo() -> Self {
        Self::new(
            DEMO.stocks
                .iter()
                .map(|(name, ticker)| (name.to_string(), ticker.to_string()))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn tickers(&self) -> Vec<String> {
        self.entries.iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn company_for(&self, ticker: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, t)| t.eq_ignore_ascii_case(ticker))
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
