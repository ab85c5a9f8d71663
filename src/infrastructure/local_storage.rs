// src/infrastructure/local_storage.rs
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::application::{ClientError, KeyValueStorage};

/// Process-local storage, gone when dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

/// One file per key inside a directory. Writes go through a temp file and
/// a rename so a crash never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// `<data_local_dir>/studydesk/storage`
    pub fn default_dir() -> Result<PathBuf> {
        let base = dirs::data_local_dir().context("Could not find local data directory")?;
        Ok(base.join("studydesk").join("storage"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    fn write_atomically(&self, path: &Path, value: &str) -> std::io::Result<()> {
        let mut file = NamedTempFile::new_in(&self.dir)?;
        file.write_all(value.as_bytes())?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    #[instrument(level = "debug", skip(self, value))]
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        let path = self.path_for(key);
        self.write_atomically(&path, value)
            .map_err(|e| ClientError::Storage(format!("{}: {}", path.display(), e)))?;
        debug!(?path, "Stored item");
        Ok(())
    }

    fn get_item(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }
}
