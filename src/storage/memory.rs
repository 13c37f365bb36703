//! In-memory storage, shared between clones

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{FileStat, Storage};
use crate::error::StorageError;

/// In-memory file store
///
/// Clones share the same files, so a test can hand one clone to the logger
/// and inspect the other.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, String>>>,
    writes: Arc<AtomicUsize>,
}

impl MemoryStorage {
    /// Creates a new, empty `MemoryStorage`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of a file, if present
    pub async fn content(&self, path: &str) -> Option<String> {
        self.files.lock().await.get(path).cloned()
    }

    /// Seed a file directly, bypassing the write counter
    pub async fn insert(&self, path: &str, content: impl Into<String>) {
        self.files
            .lock()
            .await
            .insert(path.to_string(), content.into());
    }

    /// Number of successful `write` calls so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn exists(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.files.lock().await.contains_key(path))
    }

    async fn stat(&self, path: &str) -> Result<FileStat, StorageError> {
        let files = self.files.lock().await;
        files
            .get(path)
            .map(|content| FileStat {
                size: content.len() as u64,
            })
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn read(&self, path: &str) -> Result<String, StorageError> {
        let files = self.files.lock().await;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), StorageError> {
        self.files
            .lock()
            .await
            .insert(path.to_string(), content.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
