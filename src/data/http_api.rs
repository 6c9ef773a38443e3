//! Client for the backend REST API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::config::{API, ApiConfig};
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::DataError;
use crate::data::provider::{CorrelationProvider, DataSource, PriceSeriesProvider};
use crate::data::schema::{WireCorrelationResponse, WireStockData, WireStocksList};
use crate::domain::{CorrelationSample, StockCatalog, StockData, TimeRange};

/// Outcome of one failed attempt: whether another try could help.
enum AttemptError {
    Retry(DataError),
    GiveUp(DataError),
}

pub struct HttpStockApi {
    client: Client,
    config: ApiConfig,
    base: Url,
}

impl HttpStockApi {
    /// Build a client for `config.base_url` with the configured timeout and retry policy
    pub fn new(config: ApiConfig) -> Result<Self, DataError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| DataError::unavailable(config.base_url.clone(), e))?;
        if base.cannot_be_a_base() {
            return Err(DataError::unavailable(
                config.base_url.clone(),
                "not usable as a base URL",
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DataError::unavailable(config.base_url.clone(), e))?;
        Ok(Self {
            client,
            config,
            base,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Base URL plus `segments`, each percent-encoded as exactly one path segment
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Always Ok: `new` rejected cannot-be-a-base URLs
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn attempt<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, String)],
    ) -> Result<T, AttemptError> {
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| AttemptError::Retry(DataError::unavailable(url.as_str(), e)))?;

        let status = response.status();
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_http_attempts {
            log::debug!("GET {} -> {}", url, status);
        }

        if !status.is_success() {
            let error = DataError::unavailable(url.as_str(), format!("HTTP error: {}", status));
            // Server trouble may pass, a bad request will not
            return Err(
                if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                    AttemptError::Retry(error)
                } else {
                    AttemptError::GiveUp(error)
                },
            );
        }

        let body = response
            .text()
            .await
            .map_err(|e| AttemptError::Retry(DataError::unavailable(url.as_str(), e)))?;

        serde_json::from_str(&body).map_err(|e| {
            AttemptError::GiveUp(DataError::MalformedResponse {
                resource: url.to_string(),
                reason: format!("JSON parse failed: {}", e),
            })
        })
    }

    /// GET `url` and decode the body, retrying transport and 5xx failures
    /// with a linear backoff.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, String)],
    ) -> Result<T, DataError> {
        let attempts = self.config.retries + 1;
        let mut attempt_no = 1;
        loop {
            match self.attempt(url, query).await {
                Ok(value) => return Ok(value),
                Err(AttemptError::GiveUp(e)) => return Err(e),
                Err(AttemptError::Retry(e)) if attempt_no >= attempts => return Err(e),
                Err(AttemptError::Retry(e)) => {
                    let wait = Duration::from_millis(self.config.backoff_ms * attempt_no as u64);
                    log::debug!(
                        "Attempt {}/{} for {} failed ({}), retrying in {:?}",
                        attempt_no,
                        attempts,
                        url,
                        e,
                        wait
                    );
                    sleep(wait).await;
                    attempt_no += 1;
                }
            }
        }
    }
}

impl DataSource for HttpStockApi {
    fn signature(&self) -> &'static str {
        "Backend REST API"
    }
}

#[async_trait]
impl PriceSeriesProvider for HttpStockApi {
    async fn fetch_stock_catalog(&self) -> Result<StockCatalog, DataError> {
        let url = self.url(&[API.endpoints.stocks]);
        let wire: WireStocksList = self.get_json(&url, &[]).await?;
        wire.validate(url.as_str())
    }

    async fn fetch_stock_data(
        &self,
        ticker: &str,
        range: TimeRange,
    ) -> Result<StockData, DataError> {
        let url = self.url(&[API.endpoints.stocks, ticker]);
        let query = [
            ("minutes", range.minutes().to_string()),
            ("aggregation", API.endpoints.aggregation.to_string()),
        ];
        let wire: WireStockData = self.get_json(&url, &query).await?;
        wire.validate(url.as_str())
    }
}

#[async_trait]
impl CorrelationProvider for HttpStockApi {
    async fn fetch_correlation(
        &self,
        ticker_a: &str,
        ticker_b: &str,
        range: TimeRange,
    ) -> Result<CorrelationSample, DataError> {
        let url = self.url(&[API.endpoints.stock_correlation]);
        let query = [
            ("minutes", range.minutes().to_string()),
            ("ticker", ticker_a.to_string()),
            ("ticker", ticker_b.to_string()),
        ];
        let wire: WireCorrelationResponse = self.get_json(&url, &query).await?;
        wire.validate(url.as_str(), ticker_a, ticker_b, self.signature())
    }
}
