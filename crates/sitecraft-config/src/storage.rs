//! Durable key-value storage for the persisted configuration.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;

/// Result type alias for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// String key-value storage.
pub trait ConfigStorage {
    /// Read the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

// =============================================================================
// IN-MEMORY
// =============================================================================

/// Volatile storage, mainly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Make every subsequent write and remove fail, as a full or read-only
    /// medium would.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Peek at a stored value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("memory storage is read-only".into()));
        }
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("memory storage is read-only".into()));
        }
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// FILE SYSTEM
// =============================================================================

/// One JSON file per key inside a directory.
///
/// Writes go to a temp file that is renamed over the target, so a crash
/// never leaves a half-written configuration behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage in the platform data directory.
    pub fn in_default_location() -> Self {
        Self::new(Self::default_dir())
    }

    /// Platform data directory for Sitecraft, or `./.sitecraft` when the
    /// platform offers none.
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "Sitecraft", "Sitecraft")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".sitecraft"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9_-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_stem}.json"))
    }
}

impl ConfigStorage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                operation: "read",
                path,
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source,
        })?;

        let mut file = File::create(&temp_path).map_err(|source| StorageError::Io {
            operation: "create",
            path: temp_path.clone(),
            source,
        })?;
        file.write_all(value.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|source| StorageError::Io {
                operation: "write",
                path: temp_path.clone(),
                source,
            })?;

        fs::rename(&temp_path, &path).map_err(|source| StorageError::Io {
            operation: "replace",
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = value.len(), "stored configuration");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                operation: "remove",
                path,
                source,
            }),
        }
    }
}
