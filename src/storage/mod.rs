//! Storage collaborator for the file sink
//!
//! The file sink never touches the filesystem directly; it goes through a
//! [`Storage`] implementation supplied by the host.

mod fs;
mod memory;

pub use fs::FsStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::error::StorageError;

/// Metadata returned by [`Storage::stat`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Size in bytes
    pub size: u64,
}

/// Asynchronous text-file storage.
///
/// # Required Methods
/// - `exists(path)`: whether a file is present.
/// - `stat(path)`: size of an existing file.
/// - `read(path)`: full UTF-8 content of an existing file.
/// - `write(path, content)`: replace (or create) a file with `content`.
#[async_trait]
pub trait Storage: Send + Sync + 'static {
    async fn exists(&self, path: &str) -> Result<bool, StorageError>;
    async fn stat(&self, path: &str) -> Result<FileStat, StorageError>;
    async fn read(&self, path: &str) -> Result<String, StorageError>;
    async fn write(&self, path: &str, content: &str) -> Result<(), StorageError>;
}
