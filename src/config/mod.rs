//! Configuration module for the market-view application.

pub mod analysis;
pub mod api;

mod debug; // Private because of the re-export below. Forces files to use crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod demo;

// Re-export commonly used items
pub use analysis::{ANALYSIS, AnalysisConfig};
pub use api::{API, ApiConfig};
pub use demo::DEMO;
