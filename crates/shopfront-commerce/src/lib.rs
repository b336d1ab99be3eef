//! Storefront cart domain types and logic for Shopfront.
//!
//! This crate provides the pure domain layer of the cart:
//!
//! - **Catalog**: products and stock levels as fetched from the remote
//!   source
//! - **Cart**: ordered cart items, unique by product id, with validated
//!   mutations
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_commerce::prelude::*;
//!
//! let catalog = Catalog::from(vec![Product::new(1, "Sneaker", 179.9, "img.jpg")]);
//! let stock = StockTable::from(vec![StockLevel::new(1, 3)]);
//!
//! let mut cart = Cart::new();
//! if let Some(product) = catalog.find(ProductId::new(1)) {
//!     cart.insert(product.clone())?;
//! }
//!
//! assert!(stock.can_fulfill(ProductId::new(1), cart.item_count()));
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;

pub use cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
pub use catalog::{Catalog, Product, StockLevel, StockTable};
pub use error::CommerceError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, CartItem, MAX_QUANTITY_PER_ITEM};
    pub use crate::catalog::{Catalog, Product, StockLevel, StockTable};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
}
