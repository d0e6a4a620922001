use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;

use crate::{KeyValueStore, StoreError};

/// JSON-file backed store. The file is read once on open and rewritten on
/// every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened state file");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Write `entries` to a temp file beside the target, then rename it over
    /// the target so readers never see a partial file.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(io_err)?;
                parent
            }
            None => Path::new("."),
        };

        let body = serde_json::to_vec_pretty(entries).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        let mut staged = NamedTempFile::new_in(dir).map_err(io_err)?;
        staged.write_all(&body).map_err(io_err)?;
        staged.as_file().sync_all().map_err(io_err)?;
        staged
            .persist(&self.path)
            .map_err(|err| io_err(err.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.lock();
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.lock();
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}
