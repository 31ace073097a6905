//! JSON-file-backed key-value store.
//!
//! The durable analogue of browser local storage: one JSON object on disk,
//! rewritten whole on every `set`/`remove`. The in-memory map is the source
//! of truth while the process runs; a failed flush surfaces an error but
//! leaves the map intact.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValue, StorageError};

/// Durable key-value store persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RefCell<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading existing entries if the file exists.
    ///
    /// A missing file starts the store empty. A file that exists but cannot
    /// be parsed also starts empty, with a warning: stale demo data is not
    /// worth refusing to start over.
    ///
    /// # Errors
    ///
    /// Returns an error only if the file exists but cannot be read at all.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "discarding unparseable data file");
                HashMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };

        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    /// The file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the whole map to disk.
    fn flush(&self, key: &str) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string_pretty(&*self.entries.borrow()).map_err(|source| {
                StorageError::Encode {
                    key: key.to_owned(),
                    source,
                }
            })?;
        fs::write(&self.path, encoded).map_err(|source| StorageError::Write {
            key: key.to_owned(),
            source,
        })
    }
}

impl KeyValue for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        self.flush(key)
    }

    fn remove(&self, key: &str) {
        if self.entries.borrow_mut().remove(key).is_some() {
            // Removal is best-effort; the entry is already gone in memory.
            if let Err(e) = self.flush(key) {
                tracing::warn!(key, error = %e, "failed to persist key removal");
            }
        }
    }
}
