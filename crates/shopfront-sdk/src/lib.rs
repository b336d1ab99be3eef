//! # Shopfront SDK
//!
//! Headless shopping-cart state for storefront UIs, in pure Rust.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopfront_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Storage::open("/var/lib/shopfront")?;
//!     let store = CartStore::connect(storage, StoreConfig::default())?;
//!
//!     // Fetch the catalog and stock table in the background; the cart
//!     // itself is already seeded from local storage.
//!     store.spawn_refresh();
//!
//!     store.add_product(ProductId::new(1));
//!     for item in store.snapshot() {
//!         println!("{} x{}", item.product.title, item.amount);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`shopfront_commerce`] - domain types: products, stock, the cart
//! - [`shopfront_storage`] - typed local key-value persistence
//! - [`shopfront_data`] - remote catalog/stock fetch client
//! - [`shopfront_store`] - the cart store UI components hold

pub mod prelude;

// Re-export member crates
pub use shopfront_commerce;
pub use shopfront_data;
pub use shopfront_storage;
pub use shopfront_store;

// Re-export the consumer surface at the top level for convenience
pub use shopfront_commerce::{Cart, CartItem, Product, ProductId, StockLevel, StockTable};
pub use shopfront_data::{CatalogSource, HttpCatalogSource};
pub use shopfront_storage::Storage;
pub use shopfront_store::{CartStore, ChannelSink, Notice, NoticeLevel, StoreConfig};
