//! File-backed store: one file per key under a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use iflow_types::StorageError;

use super::KeyValueStore;

const APP_DIR: &str = "iflow2api";

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory (`<data_dir>/iflow2api`).
    pub fn open_default() -> Result<Self, StorageError> {
        let base = dirs::data_dir().ok_or_else(|| StorageError::Unavailable {
            message: "no platform data directory".to_string(),
        })?;
        Ok(Self::new(base.join(APP_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StorageError::Read { key: key.to_string(), message: e.to_string() })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::from_io_error(key, &e))?;

        let path = self.path_for(key);
        let temp_path = self.dir.join(format!("{}.tmp", key));

        // Atomic write
        fs::write(&temp_path, value).map_err(|e| StorageError::from_io_error(key, &e))?;
        fs::rename(&temp_path, &path).map_err(|e| StorageError::from_io_error(key, &e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StorageError::from_io_error(key, &e))?;
        }
        Ok(())
    }
}
