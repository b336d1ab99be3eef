//! Store configuration.

use serde::{Deserialize, Serialize};
use shopfront_data::{FetchPolicy, RetryPolicy, TimeoutConfig};
use std::time::Duration;

/// Configuration for a [`CartStore`].
///
/// [`CartStore`]: crate::CartStore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the remote catalog/stock endpoints.
    pub base_url: String,
    /// Storage key the serialized cart is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Total timeout for a single fetch, in milliseconds.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
    /// Retry attempts for a failed fetch.
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,
}

fn default_storage_key() -> String {
    shopfront_storage::storage_key!("shopfront", "cart")
}

fn default_fetch_timeout_ms() -> u64 {
    10_000
}

fn default_fetch_retries() -> u32 {
    1
}

impl StoreConfig {
    /// Create a configuration for a remote base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            storage_key: default_storage_key(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            fetch_retries: default_fetch_retries(),
        }
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the fetch retry attempts.
    pub fn with_fetch_retries(mut self, retries: u32) -> Self {
        self.fetch_retries = retries;
        self
    }

    /// Build the fetch policy this configuration describes.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::new(
            TimeoutConfig::from_total(Duration::from_millis(self.fetch_timeout_ms)),
            RetryPolicy::new(self.fetch_retries),
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("http://localhost:3333")
    }
}
