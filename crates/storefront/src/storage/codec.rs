//! JSON encoding at the storage boundary.
//!
//! [`read_or_default`] is the one place where unreadable stored data is
//! turned into an empty value. Every reader goes through it.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{KeyValueStore, StorageError};

/// Decode the value under `key`.
///
/// Returns `Ok(None)` when the key is absent.
///
/// # Errors
///
/// Returns `StorageError::Malformed` if the stored string is not valid JSON
/// for `T`.
pub fn decode<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    store
        .get(key)
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| StorageError::Malformed {
                key: key.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Decode the value under `key`, or `T::default()` when it is absent or
/// malformed. Malformed entries are logged and left in place; the next
/// write overwrites them.
pub fn read_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match decode(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed storage entry");
            T::default()
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StorageError::Encode` if serialization fails; nothing is written.
pub fn write<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, raw);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_absent_key_decodes_to_none() {
        let store = MemoryStore::new();
        assert!(decode::<Vec<u32>>(&store, "missing").unwrap().is_none());
        assert!(read_or_default::<Vec<u32>>(&store, "missing").is_empty());
    }

    #[test]
    fn test_malformed_value_is_an_error_for_decode() {
        let store = MemoryStore::new();
        store.set("k", "{not json".to_owned());
        assert!(matches!(
            decode::<Vec<u32>>(&store, "k"),
            Err(StorageError::Malformed { ref key, .. }) if key == "k"
        ));
    }

    #[test]
    fn test_malformed_value_reads_as_default() {
        let store = MemoryStore::new();
        store.set("k", "{not json".to_owned());
        assert!(read_or_default::<Vec<u32>>(&store, "k").is_empty());

        store.set("k", r#"{"wrong":"shape"}"#.to_owned());
        assert!(read_or_default::<Vec<u32>>(&store, "k").is_empty());

        // Left in place for the next write to replace
        assert_eq!(store.get("k").as_deref(), Some(r#"{"wrong":"shape"}"#));
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        write(&store, "nums", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(store.get("nums").as_deref(), Some("[1,2,3]"));
        assert_eq!(read_or_default::<Vec<u32>>(&store, "nums"), vec![1, 2, 3]);
    }
}
