use std::path::Path;

use async_trait::async_trait;
use scribe_core::fs::{FileSystem, FileSystemError};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

/// Real filesystem backed by `tokio::fs`.
///
/// Every call opens its own handle in append or read mode and releases it
/// before returning. Parent directories are not created; an invalid path
/// surfaces as an I/O failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for TokioFileSystem {
    async fn append_text(&self, path: &Path, text: &str) -> Result<(), FileSystemError> {
        // Append mode creates the file itself, so any open failure here
        // (missing parent, permissions, disk) is a plain I/O failure.
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(io_err)?;

        file.write_all(text.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, FileSystemError> {
        tokio::fs::read_to_string(path).await.map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                FileSystemError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                io_err(err)
            }
        })
    }
}

fn io_err(err: std::io::Error) -> FileSystemError {
    FileSystemError::Io {
        reason: err.to_string(),
    }
}
