//! Session cart store for Shopfront.
//!
//! This crate wires the domain, storage, and data layers into the store
//! a storefront UI talks to:
//!
//! - **`CartStore`**: add/remove/update operations over the cart, with a
//!   cached catalog and stock table
//! - **Persistence**: the cart is written to local storage after every
//!   mutation and seeded back on startup
//! - **Notices**: failures surface as non-blocking user notifications,
//!   never as errors or panics
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_store::{CartStore, ChannelSink, StoreConfig};
//! use shopfront_storage::Storage;
//!
//! let storage = Storage::open("/var/lib/shopfront")?;
//! let (sink, mut notices) = ChannelSink::channel();
//!
//! let store = CartStore::connect(storage, StoreConfig::default())?;
//! store.spawn_refresh();
//!
//! store.add_product(ProductId::new(1));
//! for item in store.snapshot() {
//!     println!("{} x{}", item.product.title, item.amount);
//! }
//! ```

mod config;
mod notify;
mod store;

pub use config::StoreConfig;
pub use notify::{ChannelSink, Notice, NoticeLevel, NoticeSink, TracingSink};
pub use store::{
    CartStore, ADD_FAILED_NOTICE, OUT_OF_STOCK_NOTICE, PERSIST_FAILED_NOTICE,
    REMOVE_FAILED_NOTICE, UPDATE_FAILED_NOTICE,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::notify::{ChannelSink, Notice, NoticeLevel, NoticeSink, TracingSink};
    pub use crate::store::CartStore;
}
