use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// [`KeyValueStore`] backed by one JSON object file.
///
/// The whole map is loaded on [`open`](Self::open) and the whole file is
/// rewritten on every `set`/`remove`, via a sibling temp file and a rename,
/// so a reader never sees a half-written file. Two processes writing at once
/// lose one of the writes (last rename wins) but never corrupt the file.
///
/// Write failures are logged rather than returned, matching the
/// fire-and-forget `set` of browser storage; the in-memory view stays
/// updated for the rest of the session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Load the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read, and
    /// `StorageError::Corrupt` if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        if let Err(e) = self.try_flush() {
            tracing::error!(error = %e, "Failed to persist storage file");
        }
    }

    fn try_flush(&self) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        let body = serde_json::to_string_pretty(&*self.entries.borrow()).map_err(|source| {
            StorageError::Encode {
                key: "*".to_owned(),
                source,
            }
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.borrow_mut().insert(key.to_owned(), value);
        self.flush();
    }

    fn remove(&self, key: &str) {
        let removed = self.entries.borrow_mut().remove(key).is_some();
        if removed {
            self.flush();
        }
    }
}
