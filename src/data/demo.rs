//! Random-walk demo data, used when the backend cannot be reached.
//!
//! The generators are plain functions of an RNG and a clock, so they can be
//! called (and tested) without any provider or network state around them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::config::DEMO;
use crate::data::DataError;
use crate::data::provider::{CorrelationProvider, DataSource, PriceSeriesProvider};
use crate::domain::{CorrelationSample, PricePoint, StockCatalog, StockData, TimeRange};
use crate::utils::time_utils::minutes_before;

/// Signature of the demo provider, also stamped on every sample it generates
pub const DEMO_SIGNATURE: &str = "Demo Data";

/// One point every `step_minutes` across the window, ending just before `now`.
/// Starting price is random, each step moves by at most `max_step_change`
/// and the walk never drops below `price_floor`.
pub fn generate_stock_data<R: Rng>(rng: &mut R, minutes: u32, now: DateTime<Utc>) -> StockData {
    let config = &DEMO.series;
    let mut current_price = config.base_price_min + rng.random::<f64>() * config.base_price_span;

    let price_history: Vec<PricePoint> = (0..minutes)
        .step_by(config.step_minutes as usize)
        .map(|i| {
            let change = (rng.random::<f64>() - 0.5) * 2.0 * config.max_step_change;
            current_price = (current_price + change).max(config.price_floor);
            PricePoint::new(current_price, minutes_before(now, (minutes - i) as i64))
        })
        .collect();

    let average_price = if price_history.is_empty() {
        0.0
    } else {
        price_history.iter().map(|p| p.price).sum::<f64>() / price_history.len() as f64
    };

    StockData {
        average_price,
        price_history,
    }
}

/// Two independent walks and a coefficient drawn uniformly from [-1, 1).
/// The coefficient has nothing to do with the walks; it is demo data.
pub fn generate_correlation_sample<R: Rng>(
    rng: &mut R,
    ticker_a: &str,
    ticker_b: &str,
    minutes: u32,
    now: DateTime<Utc>,
) -> CorrelationSample {
    let correlation = (rng.random::<f64>() - 0.5) * 2.0;
    CorrelationSample {
        ticker_a: ticker_a.to_string(),
        ticker_b: ticker_b.to_string(),
        correlation,
        series_a: generate_stock_data(rng, minutes, now),
        series_b: generate_stock_data(rng, minutes, now),
        source: DEMO_SIGNATURE.to_string(),
    }
}

/// Provider wrapper around the generators. Never fails.
pub struct DemoData {
    rng: Mutex<StdRng>,
}

impl DemoData {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Same seed, same sequence of series (timestamps still follow the clock)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for DemoData {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for DemoData {
    fn signature(&self) -> &'static str {
        DEMO_SIGNATURE
    }
}

#[async_trait]
impl PriceSeriesProvider for DemoData {
    async fn fetch_stock_catalog(&self) -> Result<StockCatalog, DataError> {
        Ok(StockCatalog::demo())
    }

    async fn fetch_stock_data(
        &self,
        _ticker: &str,
        range: TimeRange,
    ) -> Result<StockData, DataError> {
        let mut rng = self.rng.lock().await;
        Ok(generate_stock_data(&mut *rng, range.minutes(), Utc::now()))
    }
}

#[async_trait]
impl CorrelationProvider for DemoData {
    async fn fetch_correlation(
        &self,
        ticker_a: &str,
        ticker_b: &str,
        range: TimeRange,
    ) -> Result<CorrelationSample, DataError> {
        let mut rng = self.rng.lock().await;
        Ok(generate_correlation_sample(
            &mut *rng,
            ticker_a,
            ticker_b,
            range.minutes(),
            Utc::now(),
        ))
    }
}
