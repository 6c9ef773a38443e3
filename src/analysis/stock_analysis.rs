use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisError;
use crate::data::PriceSeriesProvider;
use crate::domain::ticker::normalize_ticker;
use crate::domain::{StockData, TimeRange};
use crate::models::{PriceSummary, SeriesStats, compute_series_stats};

/// Everything the single-stock view shows for one ticker
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockReport {
    pub ticker: String,
    pub range: TimeRange,
    pub company: Option<String>,
    pub data: StockData,
    pub summary: PriceSummary,
    /// None when the window holds fewer than two prices
    pub stats: Option<SeriesStats>,
}

pub async fn analyze_stock<P: PriceSeriesProvider + ?Sized>(
    provider: &P,
    ticker: &str,
    range: TimeRange,
) -> Result<StockReport, AnalysisError> {
    let ticker = normalize_ticker(ticker)?;
    let data = provider.fetch_stock_data(&ticker, range).await?;

    // The company name is decoration; a missing catalogue does not fail the report
    let company = match provider.fetch_stock_catalog().await {
        Ok(catalog) => catalog.company_for(&ticker).map(str::to_string),
        Err(e) => {
            log::debug!("No catalogue for {}: {}", ticker, e);
            None
        }
    };

    let summary = PriceSummary::from_points(&data.price_history);
    let stats = match compute_series_stats(&data.prices()) {
        Ok(stats) => Some(stats),
        Err(e) => {
            log::debug!("No stats for {} over {}: {}", ticker, range, e);
            None
        }
    };

    log::info!(
        "{}: {} points over {}, current {:.2}",
        ticker,
        data.price_history.len(),
        range,
        summary.current_price
    );

    Ok(StockReport {
        ticker,
        range,
        company,
        data,
        summary,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration};

    use crate::data::{DataError, DataSource, DemoData};
    use crate::domain::{PricePoint, SelectionError, StockCatalog};

    /// Serves a fixed series for every ticker and has no catalogue
    struct FixedSeries(Vec<f64>);

    impl DataSource for FixedSeries {
        fn signature(&self) -> &'static str {
            "Fixed Series"
        }
    }

    #[async_trait]
    impl PriceSeriesProvider for FixedSeries {
        async fn fetch_stock_catalog(&self) -> Result<StockCatalog, DataError> {
            Err(DataError::unavailable("stocks", "not served"))
        }

        async fn fetch_stock_data(
            &self,
            _ticker: &str,
            _range: TimeRange,
        ) -> Result<StockData, DataError> {
            let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
            Ok(StockData {
                average_price: 0.0,
                price_history: self
                    .0
                    .iter()
                    .enumerate()
                    .map(|(i, &p)| PricePoint::new(p, start + Duration::minutes(5 * i as i64)))
                    .collect(),
            })
        }
    }

    #[tokio::test]
    async fn test_summary_and_stats() {
        let provider = FixedSeries(vec![10.0, 20.0]);
        let report = analyze_stock(&provider, " aapl ", TimeRange::default())
            .await
            .unwrap();
        assert_eq!(report.ticker, "AAPL");
        assert_eq!(report.company, None);
        assert_eq!(report.summary.current_price, 20.0);
        assert!(report.summary.is_up());
        let stats = report.stats.unwrap();
        assert!((stats.mean - 15.0).abs() < 1e-9);
        assert!((stats.sample_std_dev - 50f64.sqrt()).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_single_point_has_no_stats() {
        let provider = FixedSeries(vec![42.0]);
        let report = analyze_stock(&provider, "MSFT", TimeRange::new(5).unwrap())
            .await
            .unwrap();
        assert_eq!(report.summary.current_price, 42.0);
        assert_eq!(report.stats, None);
    }

    #[tokio::test]
    async fn test_blank_ticker_rejected() {
        let provider = FixedSeries(vec![1.0, 2.0]);
        let result = analyze_stock(&provider, "  ", TimeRange::default()).await;
        assert_eq!(
            result,
            Err(AnalysisError::Selection(SelectionError::BlankTicker))
        );

        let result = analyze_stock(&provider, "aapl#b", TimeRange::default()).await;
        assert_eq!(
            result,
            Err(AnalysisError::Selection(SelectionError::InvalidTicker {
                ticker: "AAPL#B".to_string()
            }))
        );
    }

    #[tokio::test]
    async fn test_demo_company_lookup() {
        let demo = DemoData::seeded(5);
        let report = analyze_stock(&demo, "NVDA", TimeRange::new(60).unwrap())
            .await
            .unwrap();
        assert_eq!(report.company.as_deref(), Some("Nvidia Corporation"));
        assert_eq!(report.data.price_history.len(), 12);
        assert!(report.stats.is_some());
    }
}
