use async_trait::async_trait;

use crate::data::DataError;
use crate::domain::{CorrelationSample, StockCatalog, StockData, TimeRange};

/// Common identity of every data source.
pub trait DataSource: Send + Sync {
    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Price history for single tickers, plus the list of tickers on offer.
#[async_trait]
pub trait PriceSeriesProvider: DataSource {
    async fn fetch_stock_catalog(&self) -> Result<StockCatalog, DataError>;

    async fn fetch_stock_data(&self, ticker: &str, range: TimeRange)
    -> Result<StockData, DataError>;
}

/// One correlation coefficient for a ticker pair, with both underlying series.
#[async_trait]
pub trait CorrelationProvider: DataSource {
    async fn fetch_correlation(
        &self,
        ticker_a: &str,
        ticker_b: &str,
        range: TimeRange,
    ) -> Result<CorrelationSample, DataError>;
}

/// Anything that can serve both kinds of request
pub trait MarketDataProvider: PriceSeriesProvider + CorrelationProvider {}

impl<T: PriceSeriesProvider + CorrelationProvider> MarketDataProvider for T {}
