//! Descriptive statistics over one price series.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::config::ANALYSIS;
use crate::domain::PricePoint;
use crate::utils::maths_utils;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("insufficient data: need at least {required} prices, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("price at index {index} is not a finite number ({value})")]
    NonFinite { index: usize, value: f64 },
}

/// Mean and Bessel-corrected standard deviation of a price series
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub sample_std_dev: f64,
}

/// `mean = sum / n`, `sample_std_dev = sqrt(sum((p - mean)^2) / (n - 1))`.
///
/// A single price has no sample variance (the divisor is zero), so fewer than
/// two prices is reported as [`StatsError::InsufficientData`] rather than NaN.
pub fn compute_series_stats(prices: &[f64]) -> Result<SeriesStats, StatsError> {
    let required = ANALYSIS.min_points_for_stats;
    if prices.len() < required {
        return Err(StatsError::InsufficientData {
            required,
            actual: prices.len(),
        });
    }
    if let Some((index, &value)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
        return Err(StatsError::NonFinite { index, value });
    }

    Ok(SeriesStats {
        mean: prices.iter().mean(),
        sample_std_dev: prices.iter().std_dev(),
    })
}

/// Headline numbers for a single ticker's chart
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    /// Last price in the window (0 for an empty series)
    pub current_price: f64,
    pub first_price: f64,
    /// current - first; 0 unless there are at least two points
    pub change: f64,
    pub change_pct: f64,
    pub low: f64,
    pub high: f64,
}

impl PriceSummary {
    pub fn from_points(points: &[PricePoint]) -> Self {
        let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
        let current_price = prices.last().copied().unwrap_or(0.0);
        let first_price = prices.first().copied().unwrap_or(0.0);
        let (change, change_pct) = if prices.len() > 1 {
            (
                current_price - first_price,
                maths_utils::pct_change(first_price, current_price),
            )
        } else {
            (0.0, 0.0)
        };
        let (low, high) = maths_utils::get_min_max(&prices).unwrap_or((0.0, 0.0));

        PriceSummary {
            current_price,
            first_price,
            change,
            change_pct,
            low,
            high,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
