//! Local key-value persistence for the session.
//!
//! The store only ever needs three operations on string keys, so that is
//! the whole [`KeyValueStore`] trait. Two implementations ship with the
//! crate:
//!
//! - [`MemoryStore`]: a `HashMap`, gone when the process exits. Used in
//!   tests and for throwaway sessions.
//! - [`JsonFileStore`]: a flat JSON object on disk, rewritten on every
//!   change. This is what survives a restart.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fieldwar_protocol::json;

use crate::StorageError;

/// Key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the selected mode (`restful` / `graphql`).
pub const MODE_KEY: &str = "currentType";

/// A minimal string key-value store.
///
/// `Send + Sync + 'static` because the store ends up owned by the
/// session actor's Tokio task.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Returns the value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process storage backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store that already holds the given entries.
    pub fn with_entries<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// Storage in a JSON file such as `{"token": "...", "currentType": "graphql"}`.
///
/// The whole file is read once on open and kept in memory. Every `set`
/// or `remove` writes a sibling temp file and renames it over the
/// previous one, so a crash mid-write leaves the old contents intact.
///
/// The in-memory entries only change once the write has succeeded: after
/// a failed `set` or `remove`, `get` still agrees with the file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens (or prepares to create) the store at `path`.
    ///
    /// A missing file is an empty store; the file and its parent
    /// directories are created on the first write.
    ///
    /// # Errors
    /// - [`StorageError::Io`] if the file exists but can't be read.
    /// - [`StorageError::Corrupt`] if it isn't a JSON object of strings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) => json::decode(&bytes).map_err(|source| {
                StorageError::Corrupt {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(StorageError::Io { path, source });
            }
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened state file");
        Ok(Self { path, entries })
    }

    /// Opens the store at the platform's per-user data location
    /// (for example `~/.local/share/fieldwar/session.json` on Linux).
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(default_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `entries` to disk. The caller adopts them only on `Ok`.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let bytes = json::encode_pretty(entries).map_err(|source| StorageError::Encode {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

/// Where [`JsonFileStore::open_default`] keeps its file.
pub fn default_path() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("", "", "fieldwar")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .ok_or(StorageError::NoDataDir)
}
