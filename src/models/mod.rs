// The correlation/statistics engine: pure, synchronous, no I/O
pub mod classification;
pub mod correlation;
pub mod correlation_matrix;
pub mod series_stats;

// Re-export commonly used types
pub use classification::{CorrelationBand, classify_correlation, heat_color};
pub use correlation::{PairCorrelation, unique_pairs};
pub use correlation_matrix::{CorrelationMatrix, build_correlation_matrix};
pub use series_stats::{PriceSummary, SeriesStats, StatsError, compute_series_stats};
