//! HTTP fetch client for the remote read endpoints.

use crate::retry::RetryPolicy;
use crate::source::CatalogSource;
use crate::timeout::TimeoutConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shopfront_commerce::{Product, StockLevel};

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

/// Fetch policy combining timeout and retry configuration.
#[derive(Debug, Clone, Default)]
pub struct FetchPolicy {
    /// Timeout configuration.
    pub timeout: TimeoutConfig,
    /// Retry policy.
    pub retry: RetryPolicy,
}

impl FetchPolicy {
    /// Create a new fetch policy.
    pub fn new(timeout: TimeoutConfig, retry: RetryPolicy) -> Self {
        Self { timeout, retry }
    }
}

/// HTTP source for the remote catalog and stock endpoints.
///
/// Issues JSON GETs against `{base}/products` and `{base}/stock` with
/// automatic timeout and retry.
pub struct HttpCatalogSource {
    base_url: String,
    client: reqwest::Client,
    policy: FetchPolicy,
}

impl HttpCatalogSource {
    /// Create a source with the default fetch policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_policy(base_url, FetchPolicy::default())
    }

    /// Create a source with an explicit fetch policy.
    pub fn with_policy(
        base_url: impl Into<String>,
        policy: FetchPolicy,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(policy.timeout.connect)
            .timeout(policy.timeout.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            policy,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.url_for(path);
        let mut attempt = 0;
        loop {
            match self.send(&url).await {
                Ok(body) => {
                    return serde_json::from_slice(&body)
                        .map_err(|e| FetchError::Deserialization(e.to_string()));
                }
                Err(err) => {
                    if !self.should_retry(&err, attempt) {
                        return Err(err);
                    }
                    let delay = self.policy.retry.backoff.delay_for_attempt(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn send(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self.client.get(url).send().await.map_err(classify)?;

        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(classify)?;
        Ok(bytes.to_vec())
    }

    fn should_retry(&self, err: &FetchError, attempt: u32) -> bool {
        match err {
            FetchError::Http { status, .. } => {
                self.policy.retry.should_retry_status(*status, attempt)
            }
            FetchError::Timeout(_) => self.policy.retry.should_retry_timeout(attempt),
            FetchError::Connection(_) => self.policy.retry.should_retry_connection(attempt),
            _ => false,
        }
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(e.to_string())
    } else if e.is_connect() {
        FetchError::Connection(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_json("products").await
    }

    async fn fetch_stock(&self) -> Result<Vec<StockLevel>, FetchError> {
        self.get_json("stock").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let source = HttpCatalogSource::new("http://localhost:3333/").unwrap();
        assert_eq!(source.url_for("products"), "http://localhost:3333/products");
        assert_eq!(source.url_for("stock"), "http://localhost:3333/stock");
    }

    #[test]
    fn test_retry_classification() {
        let policy = FetchPolicy::new(TimeoutConfig::default(), RetryPolicy::new(2));
        let source = HttpCatalogSource::with_policy("http://localhost", policy).unwrap();

        let server_error = FetchError::Http {
            status: 503,
            url: "http://localhost/products".to_string(),
        };
        let not_found = FetchError::Http {
            status: 404,
            url: "http://localhost/products".to_string(),
        };
        let garbled = FetchError::Deserialization("bad json".to_string());

        assert!(source.should_retry(&server_error, 0));
        assert!(!source.should_retry(&server_error, 2));
        assert!(!source.should_retry(&not_found, 0));
        assert!(!source.should_retry(&garbled, 0));
    }
}
