use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observed price. Series are ordered by `observed_at` ascending.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub price: f64,
    pub observed_at: DateTime<Utc>,
}

impl PricePoint {
    pub fn new(price: f64, observed_at: DateTime<Utc>) -> Self {
        PricePoint { price, observed_at }
    }
}

/// Just the prices, in series order
pub fn prices(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.price).collect()
}

/// Price history for a single ticker as served by `/stocks/{ticker}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockData {
    /// Average as computed by the data source (not recomputed here)
    pub average_price: f64,
    pub price_history: Vec<PricePoint>,
}

impl StockData {
    pub fn prices(&self) -> Vec<f64> {
        prices(&self.price_history)
    }

    pub fn is_empty(&self) -> bool {
        self.price_history.is_empty()
    }
}

/// What a correlation provider hands back for one ticker pair:
/// the coefficient plus both raw series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CorrelationSample {
    pub ticker_a: String,
    pub ticker_b: String,
    pub correlation: f64,
    pub series_a: StockData,
    pub series_b: StockData,
    /// Signature of the provider that produced the sample
    pub source: String,
}
