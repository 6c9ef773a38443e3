// Orchestration: fetch through a provider, run the pure models, assemble reports
pub mod correlation_analysis;
pub mod stock_analysis;

use thiserror::Error;

use crate::data::DataError;
use crate::domain::SelectionError;
use crate::models::StatsError;

// Re-export commonly used types
pub use correlation_analysis::{CorrelationReport, PairFailure, analyze_correlations};
pub use stock_analysis::{StockReport, analyze_stock};

/// Anything that can stop a single analysis step
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}
