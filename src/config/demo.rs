//! config/demo.rs Demo data configuration knobs.
//!
//! Used whenever the backend cannot be reached (or `--offline` is passed),
//! so the tool still produces something to look at.

/// Parameters of the random-walk price generator
pub struct MockSeriesConfig {
    /// Spacing between generated points (minutes)
    pub step_minutes: u32,
    /// Starting price is drawn uniformly from [base_price_min, base_price_min + base_price_span)
    pub base_price_min: f64,
    pub base_price_span: f64,
    /// Each step moves the price by at most +/- this amount
    pub max_step_change: f64,
    /// Walk never goes below this price
    pub price_floor: f64,
}

/// The Master Demo Configuration
pub struct DemoConfig {
    /// Fallback catalogue as (company name, ticker)
    pub stocks: &'static [(&'static str, &'static str)],
    pub series: MockSeriesConfig,
}

pub const DEMO: DemoConfig = DemoConfig {
    stocks: &[
        ("Apple Inc.", "AAPL"),
        ("Microsoft Corporation", "MSFT"),
        ("Nvidia Corporation", "NVDA"),
        ("Tesla, Inc.", "TSLA"),
        ("Amazon.com, Inc.", "AMZN"),
        ("Alphabet Inc. Class A", "GOOGL"),
        ("Meta Platforms, Inc.", "META"),
        ("PayPal Holdings, Inc.", "PYPL"),
    ],
    series: MockSeriesConfig {
        step_minutes: 5,
        base_price_min: 100.0,
        base_price_span: 400.0,
        max_step_change: 10.0,
        price_floor: 10.0,
    },
};
