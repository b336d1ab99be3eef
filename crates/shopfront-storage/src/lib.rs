//! Typed local key-value persistence for Shopfront.
//!
//! Provides a simple, ergonomic API for persisting session data with
//! automatic JSON serialization over pluggable backends: in-memory for
//! tests and ephemeral sessions, file-backed for durable local state.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storage::{storage_key, Storage};
//!
//! let storage = Storage::open("/var/lib/shopfront")?;
//! let key = storage_key!("shopfront", "cart");
//!
//! // Store a value
//! storage.set(&key, &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = storage.get(&key)?;
//!
//! // Delete a value
//! storage.delete(&key)?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use error::StorageError;
pub use kv::Storage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileBackend, MemoryBackend, Storage, StorageBackend, StorageError};
}
