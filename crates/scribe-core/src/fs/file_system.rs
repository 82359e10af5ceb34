use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use thiserror::Error;

/// Errors produced by filesystem implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileSystemError {
    /// The file does not exist.
    #[error("no such file: {path}")]
    NotFound { path: String },
    /// Any other I/O failure (permissions, disk, invalid path).
    #[error("filesystem failure: {reason}")]
    Io { reason: String },
}

/// Contract for the durable text files a record store writes to and reads
/// from. Each call is a complete open-act-close sequence; no handle survives
/// across calls.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Append `text` to the file at `path`, creating the file on first write.
    async fn append_text(&self, path: &Path, text: &str) -> Result<(), FileSystemError>;

    /// Read the entire file as UTF-8 text. A missing file is `NotFound`,
    /// never an empty string.
    async fn read_to_string(&self, path: &Path) -> Result<String, FileSystemError>;
}

/// In-memory filesystem for tests and smoke runs. Files live in a
/// mutex-guarded map; like the real thing, a file only exists once something
/// has been appended or seeded.
#[derive(Debug, Default, Clone)]
pub struct InMemoryFileSystem {
    inner: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl InMemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with exact contents, overwriting any existing entry.
    pub fn write(
        &self,
        path: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) -> Result<(), FileSystemError> {
        let mut files = self.lock()?;
        files.insert(path.into(), contents.into());
        Ok(())
    }

    /// Raw contents of a file, or `None` if it does not exist.
    pub fn contents(&self, path: &Path) -> Result<Option<String>, FileSystemError> {
        let files = self.lock()?;
        Ok(files.get(path).cloned())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<PathBuf, String>>, FileSystemError> {
        self.inner.lock().map_err(|err| FileSystemError::Io {
            reason: format!("lock poisoned: {err}"),
        })
    }
}

#[async_trait]
impl FileSystem for InMemoryFileSystem {
    async fn append_text(&self, path: &Path, text: &str) -> Result<(), FileSystemError> {
        let mut files = self.lock()?;
        files.entry(path.to_path_buf()).or_default().push_str(text);
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, FileSystemError> {
        let files = self.lock()?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| FileSystemError::NotFound {
                path: path.display().to_string(),
            })
    }
}
