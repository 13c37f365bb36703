//! Storage backed by files under a root directory

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io;

use super::{FileStat, Storage};
use crate::error::StorageError;

/// File store rooted at a directory; paths are relative to that root
#[derive(Clone, Debug)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Creates a new `FsStorage` with the specified root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn file_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        fs::try_exists(self.file_path(path))
            .await
            .map_err(|e| StorageError::Io("error checking file", e))
    }

    async fn stat(&self, path: &str) -> Result<FileStat, StorageError> {
        match fs::metadata(self.file_path(path)).await {
            Ok(metadata) => Ok(FileStat {
                size: metadata.len(),
            }),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Io("error reading file metadata", e)),
        }
    }

    /// Invalid UTF-8 is replaced rather than rejected, so a damaged log file
    /// can still be appended to
    async fn read(&self, path: &str) -> Result<String, StorageError> {
        match fs::read(self.file_path(path)).await {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(StorageError::Io("error reading file", e)),
        }
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), StorageError> {
        let file_path = self.file_path(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io("error creating directory", e))?;
        }

        fs::write(&file_path, content)
            .await
            .map_err(|e| StorageError::Io("error writing file", e))
    }
}
