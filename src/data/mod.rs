// Data providers: backend REST API, demo data, and the fallback chain between them
pub mod demo;
pub mod fallback;
pub mod http_api;
pub mod provider;
pub mod schema;

use thiserror::Error;

// Re-export commonly used types
pub use demo::DemoData;
pub use fallback::FallbackChain;
pub use http_api::HttpStockApi;
pub use provider::{CorrelationProvider, DataSource, MarketDataProvider, PriceSeriesProvider};

/// Errors surfaced by data providers. The caller decides whether to skip or abort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("{resource} unavailable: {reason}")]
    Unavailable { resource: String, reason: String },

    #[error("malformed response from {resource}: {reason}")]
    MalformedResponse { resource: String, reason: String },

    #[error("no data providers configured")]
    NoProviders,
}

impl DataError {
    pub fn unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        DataError::Unavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
