//! Analysis and selection configuration

/// Configuration for the ticker selection
pub struct SelectionLimits {
    // A correlation needs at least two series
    pub min_tickers: usize,
    // Upper bound keeps the heatmap readable (8 tickers = 28 pair requests)
    pub max_tickers: usize,
    // How many catalogue tickers to pre-select when the user names none
    pub default_ticker_count: usize,
}

/// Configuration for the time range slider (all values in minutes)
pub struct TimeRangeConfig {
    pub min_minutes: u32,
    pub max_minutes: u32,
    pub step_minutes: u32,
    pub default_minutes: u32,
}

/// Lower bounds of the correlation bands, strongest first.
/// A value exactly on a threshold belongs to the band above it.
pub struct BandThresholds {
    pub strong_positive: f64,
    pub moderate_positive: f64,
    pub weak: f64,
    pub moderate_negative: f64,
}

/// Layout of the text report
pub struct ReportLayout {
    // Pair detail cards shown under the matrix
    pub pair_cards: usize,
    // Decimals for matrix cells
    pub cell_precision: usize,
}

/// The Master Analysis Configuration
pub struct AnalysisConfig {
    pub selection: SelectionLimits,
    pub time_range: TimeRangeConfig,
    pub bands: BandThresholds,
    pub report: ReportLayout,
    // Minimum prices needed for a sample standard deviation (Bessel's correction)
    pub min_points_for_stats: usize,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    selection: SelectionLimits {
        min_tickers: 2,
        max_tickers: 8,
        default_ticker_count: 4,
    },

    time_range: TimeRangeConfig {
        min_minutes: 5,
        max_minutes: 120,
        step_minutes: 5,
        default_minutes: 30,
    },

    bands: BandThresholds {
        strong_positive: 0.7,
        moderate_positive: 0.3,
        weak: -0.3,
        moderate_negative: -0.7,
    },

    report: ReportLayout {
        pair_cards: 4,
        cell_precision: 2,
    },

    min_points_for_stats: 2,
};
