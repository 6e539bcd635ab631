//! Flat key-value persistence.
//!
//! Everything the storefront remembers (accounts, the session principal,
//! carts, order history) is a JSON string under a string key, in the manner
//! of browser local storage. The store itself knows nothing about JSON;
//! encoding and the fail-open decode live in [`codec`].
//!
//! # Implementations
//!
//! - [`MemoryStore`] - process-local map, used by tests and throwaway sessions
//! - [`FileStore`] - a single JSON object file, rewritten atomically on every write

pub mod codec;
mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use thiserror::Error;

/// A synchronous string-to-string store.
///
/// Writes replace the whole value under a key; there are no partial
/// updates. Methods take `&self` so several services can share one store
/// within a single-threaded session.
pub trait KeyValueStore {
    /// Read the value under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: String);

    /// Delete `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// Errors raised at the storage boundary.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("storage I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings.
    #[error("storage file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value could not be decoded into the expected type.
    #[error("malformed value under {key:?}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("failed to encode value for {key:?}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
