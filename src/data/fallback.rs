use async_trait::async_trait;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::DataError;
use crate::data::provider::{
    CorrelationProvider, DataSource, MarketDataProvider, PriceSeriesProvider,
};
use crate::domain::{CorrelationSample, StockCatalog, StockData, TimeRange};

/// Tries each provider in order and returns the first success.
/// Every failure is logged; if all fail, the last error is returned.
pub struct FallbackChain {
    providers: Vec<Box<dyn MarketDataProvider>>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Box<dyn MarketDataProvider>>) -> Self {
        Self { providers }
    }

    /// The usual setup: real backend first, demo data if that fails
    pub fn with_demo_fallback(
        primary: impl MarketDataProvider + 'static,
        demo: impl MarketDataProvider + 'static,
    ) -> Self {
        Self::new(vec![Box::new(primary), Box::new(demo)])
    }

    pub fn signatures(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.signature()).collect()
    }
}

fn log_failure(signature: &str, what: &str, error: &DataError) {
    log::warn!("{} failed for {}: {}", signature, what, error);
}

#[allow(unused_variables)]
fn log_success(signature: &str, what: &str) {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_provider_choice {
        log::debug!("{} served {}", signature, what);
    }
}

impl DataSource for FallbackChain {
    fn signature(&self) -> &'static str {
        "Fallback Chain"
    }
}

// One body shared by every trait method below: walk the providers, stop at the first Ok.
macro_rules! first_success {
    ($self:ident, $what:expr, |$provider:ident| $call:expr) => {{
        let what = $what;
        let mut last_error = DataError::NoProviders;
        for $provider in &$self.providers {
            match $call.await {
                Ok(value) => {
                    log_success($provider.signature(), &what);
                    return Ok(value);
                }
                Err(e) => {
                    log_failure($provider.signature(), &what, &e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }};
}

#[async_trait]
impl PriceSeriesProvider for FallbackChain {
    async fn fetch_stock_catalog(&self) -> Result<StockCatalog, DataError> {
        first_success!(self, "stock catalogue".to_string(), |provider| provider
            .fetch_stock_catalog())
    }

    async fn fetch_stock_data(
        &self,
        ticker: &str,
        range: TimeRange,
    ) -> Result<StockData, DataError> {
        first_success!(self, format!("{} ({})", ticker, range), |provider| provider
            .fetch_stock_data(ticker, range))
    }
}

#[async_trait]
impl CorrelationProvider for FallbackChain {
    async fn fetch_correlation(
        &self,
        ticker_a: &str,
        ticker_b: &str,
        range: TimeRange,
    ) -> Result<CorrelationSample, DataError> {
        first_success!(
            self,
            format!("{}/{} correlation ({})", ticker_a, ticker_b, range),
            |provider| provider.fetch_correlation(ticker_a, ticker_b, range)
        )
    }
}
