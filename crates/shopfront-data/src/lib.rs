//! Remote catalog and stock fetch client for Shopfront.
//!
//! This crate provides:
//! - `CatalogSource` - async trait over the two remote read endpoints
//! - `HttpCatalogSource` - JSON-over-HTTP implementation
//! - `TimeoutConfig` - per-fetch timeouts
//! - `RetryPolicy` - retry strategies

mod client;
mod retry;
mod source;
mod timeout;

pub use client::*;
pub use retry::*;
pub use source::*;
pub use timeout::*;
