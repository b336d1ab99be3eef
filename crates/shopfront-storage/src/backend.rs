//! Storage backends.
//!
//! A backend stores raw bytes under string keys. The typed [`Storage`]
//! wrapper sits on top and handles serialization, so backends stay
//! oblivious to what they hold.
//!
//! [`Storage`]: crate::Storage

use crate::StorageError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Raw byte storage under string keys.
pub trait StorageBackend: Send + Sync {
    /// Load the bytes stored under a key, if any.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store bytes under a key, replacing any previous value.
    fn store(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists.
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.load(key)?.is_some())
    }

    /// List all stored keys.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn store(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries().contains_key(key))
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries().keys().cloned().collect())
    }
}

/// File-backed backend: one file per key under a directory.
///
/// The durable analog of browser local storage. Keys are used as file
/// names directly, so they must not contain path separators.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

const VALUE_EXT: &str = "json";

impl FileBackend {
    /// Open a backend rooted at a directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StorageError::OpenError(format!("{}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(StorageError::StoreError(format!(
                "key not usable as a file name: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.{VALUE_EXT}")))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::write(self.path_for(key)?, bytes)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.path_for(key)?.exists())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        Ok(keys)
    }
}
