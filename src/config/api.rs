//! Backend REST API configuration constants and types.

/// Configuration for the backend REST API client
/// (This is the runtime struct handed to the Http provider)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API.base_url.to_string(),
            timeout_ms: API.client.timeout_ms,
            retries: API.client.retries,
            backoff_ms: API.client.backoff_ms,
        }
    }
}

impl ApiConfig {
    /// Same defaults, different server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Endpoint paths exposed by the backend
pub struct Endpoints {
    pub stocks: &'static str,
    pub stock_correlation: &'static str,
    /// Query value for `aggregation` on the single stock endpoint
    pub aggregation: &'static str,
}

/// Default values for the Rest Client
pub struct ClientDefaults {
    pub timeout_ms: u64,
    pub retries: u32,
    pub backoff_ms: u64,
}

/// The Master Configuration Struct
pub struct ApiDefaults {
    pub base_url: &'static str,
    pub endpoints: Endpoints,
    pub client: ClientDefaults,
}

pub const API: ApiDefaults = ApiDefaults {
    base_url: "http://localhost:3001",
    endpoints: Endpoints {
        stocks: "stocks",
        stock_correlation: "stockcorrelation",
        aggregation: "average",
    },
    client: ClientDefaults {
        timeout_ms: 5000,
        retries: 2,
        backoff_ms: 250,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_keeps_client_defaults() {
        let config = ApiConfig::with_base_url("http://example.test:3001/");
        assert_eq!(config.base_url, "http://example.test:3001/");
        assert_eq!(config.retries, API.client.retries);
        assert_eq!(ApiConfig::default().base_url, "http://localhost:3001");
    }
}
