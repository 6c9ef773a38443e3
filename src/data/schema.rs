//! Wire shapes of the backend REST API and their validation into domain types.
//!
//! Everything the server sends passes through here. Anything that does not
//! match the expected shape becomes [`DataError::MalformedResponse`] instead of
//! surfacing later as a missing field or a NaN.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::data::DataError;
use crate::domain::ticker::normalize_ticker;
use crate::domain::{CorrelationSample, PricePoint, StockCatalog, StockData};

// Coefficients a hair outside [-1, 1] from floating point error are clamped, not rejected
const CORRELATION_SLACK: f64 = 1e-9;

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePricePoint {
    pub price: f64,
    pub last_updated_at: String,
}

/// `GET /stocks/{ticker}`
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireStockData {
    pub average_stock_price: f64,
    pub price_history: Vec<WirePricePoint>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireCorrelationStock {
    pub average_price: f64,
    pub price_history: Vec<WirePricePoint>,
}

/// `GET /stockcorrelation`
#[derive(Deserialize, Debug, Clone)]
pub struct WireCorrelationResponse {
    pub correlation: f64,
    pub stocks: HashMap<String, WireCorrelationStock>,
}

/// `GET /stocks`. Values are checked by hand so a non-string ticker is a
/// validation error rather than an opaque decode failure.
#[derive(Deserialize, Debug, Clone)]
pub struct WireStocksList {
    pub stocks: serde_json::Map<String, serde_json::Value>,
}

fn malformed(resource: &str, reason: impl Into<String>) -> DataError {
    DataError::MalformedResponse {
        resource: resource.to_string(),
        reason: reason.into(),
    }
}

fn validate_price_history(
    resource: &str,
    history: Vec<WirePricePoint>,
) -> Result<Vec<PricePoint>, DataError> {
    let mut points = history
        .into_iter()
        .enumerate()
        .map(|(index, wire)| {
            if !wire.price.is_finite() || wire.price < 0.0 {
                return Err(malformed(
                    resource,
                    format!("priceHistory[{}].price is invalid ({})", index, wire.price),
                ));
            }
            let observed_at = DateTime::parse_from_rfc3339(&wire.last_updated_at)
                .map_err(|e| {
                    malformed(
                        resource,
                        format!(
                            "priceHistory[{}].lastUpdatedAt '{}' is not RFC 3339: {}",
                            index, wire.last_updated_at, e
                        ),
                    )
                })?
                .with_timezone(&Utc);
            Ok(PricePoint::new(wire.price, observed_at))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Callers rely on ascending time order
    if !points.is_sorted_by_key(|p| p.observed_at) {
        log::debug!("{}: price history arrived out of order, sorting", resource);
        points.sort_by_key(|p| p.observed_at);
    }
    Ok(points)
}

fn validate_average(resource: &str, field: &str, value: f64) -> Result<f64, DataError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(malformed(resource, format!("{} is not finite ({})", field, value)))
    }
}

impl WireStockData {
    pub fn validate(self, resource: &str) -> Result<StockData, DataError> {
        Ok(StockData {
            average_price: validate_average(resource, "averageStockPrice", self.average_stock_price)?,
            price_history: validate_price_history(resource, self.price_history)?,
        })
    }
}

impl WireCorrelationStock {
    fn validate(self, resource: &str) -> Result<StockData, DataError> {
        Ok(StockData {
            average_price: validate_average(resource, "averagePrice", self.average_price)?,
            price_history: validate_price_history(resource, self.price_history)?,
        })
    }
}

impl WireCorrelationResponse {
    pub fn validate(
        mut self,
        resource: &str,
        ticker_a: &str,
        ticker_b: &str,
        source: &str,
    ) -> Result<CorrelationSample, DataError> {
        if !self.correlation.is_finite() || self.correlation.abs() > 1.0 + CORRELATION_SLACK {
            return Err(malformed(
                resource,
                format!("correlation {} is outside [-1, 1]", self.correlation),
            ));
        }

        let mut take = |ticker: &str| {
            self.stocks
                .remove(ticker)
                .ok_or_else(|| malformed(resource, format!("stocks.{} is missing", ticker)))
                .and_then(|stock| stock.validate(resource))
        };
        let series_a = take(ticker_a)?;
        let series_b = take(ticker_b)?;

        Ok(CorrelationSample {
            ticker_a: ticker_a.to_string(),
            ticker_b: ticker_b.to_string(),
            correlation: self.correlation.clamp(-1.0, 1.0),
            series_a,
            series_b,
            source: source.to_string(),
        })
    }
}

impl WireStocksList {
    pub fn validate(self, resource: &str) -> Result<StockCatalog, DataError> {
        let entries = self
            .stocks
            .into_iter()
            .map(|(name, value)| match value.as_str().map(normalize_ticker) {
                Some(Ok(ticker)) => Ok((name, ticker)),
                _ => Err(malformed(
                    resource,
                    format!("stocks['{}'] is not a ticker string: {}", name, value),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StockCatalog::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOCK_JSON: &str = r#"{
        "averageStockPrice": 101.5,
        "priceHistory": [
            { "price": 100.0, "lastUpdatedAt": "2025-01-02T10:00:00.000Z" },
            { "price": 103.0, "lastUpdatedAt": "2025-01-02T10:05:00.000Z" }
        ]
    }"#;

    #[test]
    fn test_stock_data_round_trip_from_wire() {
        let wire: WireStockData = serde_json::from_str(STOCK_JSON).unwrap();
        let data = wire.validate("stocks/AAPL").unwrap();
        assert_eq!(data.average_price, 101.5);
        assert_eq!(data.prices(), vec![100.0, 103.0]);
        assert!(data.price_history[0].observed_at < data.price_history[1].observed_at);
    }

    #[test]
    fn test_missing_field_fails_to_decode() {
        let json = r#"{ "priceHistory": [] }"#;
        assert!(serde_json::from_str::<WireStockData>(json).is_err());
    }

    #[test]
    fn test_bad_timestamp_is_malformed() {
        let json = r#"{
            "averageStockPrice": 1.0,
            "priceHistory": [ { "price": 1.0, "lastUpdatedAt": "yesterday" } ]
        }"#;
        let wire: WireStockData = serde_json::from_str(json).unwrap();
        assert!(matches!(
            wire.validate("stocks/AAPL"),
            Err(DataError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_negative_price_is_malformed() {
        let json = r#"{
            "averageStockPrice": 1.0,
            "priceHistory": [ { "price": -4.0, "lastUpdatedAt": "2025-01-02T10:00:00Z" } ]
        }"#;
        let wire: WireStockData = serde_json::from_str(json).unwrap();
        assert!(wire.validate("stocks/AAPL").is_err());
    }

    #[test]
    fn test_out_of_order_history_is_sorted() {
        let json = r#"{
            "averageStockPrice": 2.0,
            "priceHistory": [
                { "price": 3.0, "lastUpdatedAt": "2025-01-02T10:05:00Z" },
                { "price": 1.0, "lastUpdatedAt": "2025-01-02T10:00:00Z" }
            ]
        }"#;
        let wire: WireStockData = serde_json::from_str(json).unwrap();
        assert_eq!(wire.validate("stocks/X").unwrap().prices(), vec![1.0, 3.0]);
    }

    #[test]
    fn test_correlation_response() {
        let json = r#"{
            "correlation": 0.63,
            "stocks": {
                "AAPL": { "averagePrice": 10.0, "priceHistory": [
                    { "price": 9.0, "lastUpdatedAt": "2025-01-02T10:00:00Z" },
                    { "price": 11.0, "lastUpdatedAt": "2025-01-02T10:05:00Z" } ] },
                "MSFT": { "averagePrice": 20.0, "priceHistory": [
                    { "price": 19.0, "lastUpdatedAt": "2025-01-02T10:00:00Z" },
                    { "price": 21.0, "lastUpdatedAt": "2025-01-02T10:05:00Z" } ] }
            }
        }"#;
        let wire: WireCorrelationResponse = serde_json::from_str(json).unwrap();
        let sample = wire.clone().validate("stockcorrelation", "AAPL", "MSFT", "Backend").unwrap();
        assert_eq!(sample.correlation, 0.63);
        assert_eq!(sample.series_b.average_price, 20.0);
        assert_eq!(sample.source, "Backend");

        let missing = wire.validate("stockcorrelation", "AAPL", "NVDA", "Backend");
        assert!(matches!(missing, Err(DataError::MalformedResponse { .. })));
    }

    #[test]
    fn test_correlation_out_of_range() {
        let json = r#"{ "correlation": 1.7, "stocks": {} }"#;
        let wire: WireCorrelationResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            wire.validate("stockcorrelation", "A", "B", "Backend"),
            Err(DataError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_stocks_list_keeps_order() {
        let json = r#"{ "stocks": { "Tesla, Inc.": "TSLA", "Apple Inc.": "aapl" } }"#;
        let wire: WireStocksList = serde_json::from_str(json).unwrap();
        let catalogue = wire.validate("stocks").unwrap();
        assert_eq!(catalogue.tickers(), vec!["TSLA", "AAPL"]);

        let bad = r#"{ "stocks": { "Apple Inc.": 42 } }"#;
        let wire: WireStocksList = serde_json::from_str(bad).unwrap();
        assert!(wire.validate("stocks").is_err());

        let bad = r#"{ "stocks": { "Apple Inc.": "AAPL/../x" } }"#;
        let wire: WireStocksList = serde_json::from_str(bad).unwrap();
        assert!(matches!(
            wire.validate("stocks"),
            Err(DataError::MalformedResponse { .. })
        ));
    }
}
