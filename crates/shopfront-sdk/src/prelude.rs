//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use shopfront_sdk::prelude::*;
//! ```
//!
//! This imports all commonly used items:
//! - Domain: `Product`, `ProductId`, `Cart`, `CartItem`, stock types
//! - Store: `CartStore`, `StoreConfig`, notices and sinks
//! - Storage: `Storage` and its backends
//! - Data: `CatalogSource`, `HttpCatalogSource`, fetch policies

// Domain types
pub use shopfront_commerce::prelude::*;

// Storage
pub use shopfront_storage::prelude::*;

// Remote source
pub use shopfront_data::{
    BackoffStrategy, CatalogSource, FetchError, FetchPolicy, HttpCatalogSource, RetryPolicy,
    TimeoutConfig,
};

// Store
pub use shopfront_store::prelude::*;
