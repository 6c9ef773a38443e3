// Domain types and value objects
pub mod price_point;
pub mod stock_catalog;
pub mod ticker;
pub mod time_range;

// Re-export commonly used types
pub use price_point::{CorrelationSample, PricePoint, StockData};
pub use stock_catalog::StockCatalog;
pub use ticker::{SelectionError, TickerSelection};
pub use time_range::TimeRange;
