//! The remote catalog/stock source trait.

use crate::FetchError;
use async_trait::async_trait;
use shopfront_commerce::{Product, StockLevel};

/// A read-only remote source for the product catalog and stock table.
///
/// The cart store depends on this trait rather than on a concrete HTTP
/// client, so tests can serve fixtures and a UI shell can swap transports.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full product catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError>;

    /// Fetch the full stock table.
    async fn fetch_stock(&self) -> Result<Vec<StockLevel>, FetchError>;
}
