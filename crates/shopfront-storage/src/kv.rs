//! Typed storage wrapper with automatic serialization.

use crate::backend::{FileBackend, MemoryBackend, StorageBackend};
use crate::StorageError;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Type-safe local storage over a pluggable backend.
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Handles are cheap to clone and
/// share the same backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageBackend>,
}

impl Storage {
    /// Create storage over an arbitrary backend.
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Create ephemeral in-memory storage.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let storage = Storage::in_memory();
    /// ```
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open file-backed storage rooted at a directory.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let storage = Storage::open("~/.local/share/shopfront")?;
    /// ```
    pub fn open(dir: impl Into<std::path::PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(FileBackend::open(dir)?))
    }

    /// Get a value from storage.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = storage.get("shopfront:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.load(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in storage.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// storage.set("shopfront:cart", &cart)?;
    /// ```
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.store(key, &bytes)
    }

    /// Delete a value from storage.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Check if a key exists in storage.
    pub fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.backend.contains(key)
    }

    /// Get all keys in storage.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.backend.keys()
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = storage_key!("shopfront", "cart");
/// // Returns "shopfront:cart"
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
