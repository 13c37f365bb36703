//! Buffered, rotating file sink
//!
//! A single writer task owns the pending buffer. Log calls enqueue formatted
//! entries over an unbounded channel and never wait on storage; flushes are
//! serialized by the task, so two flushes can never interleave their
//! read-modify-write on the destination file.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use super::console::ConsoleSink;
use super::format;
use super::level::Level;
use crate::error::StorageError;
use crate::storage::Storage;

/// Default number of pending entries that triggers an automatic flush
pub const DEFAULT_CAPACITY_THRESHOLD: usize = 100;

/// Default file size (5 MiB) above which the next flush rotates the file
pub const DEFAULT_ROTATION_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Buffering and rotation thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferSettings {
    /// Pending entry count that triggers an automatic flush
    pub capacity_threshold: usize,
    /// Destination size in bytes above which the file is truncated on flush
    pub rotation_size_bytes: u64,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            capacity_threshold: DEFAULT_CAPACITY_THRESHOLD,
            rotation_size_bytes: DEFAULT_ROTATION_SIZE_BYTES,
        }
    }
}

enum Command {
    Append(String),
    Flush(oneshot::Sender<Result<(), StorageError>>),
    Snapshot(oneshot::Sender<Vec<String>>),
    Shutdown(oneshot::Sender<Result<(), StorageError>>),
}

/// Cheap, cloneable sender into a running file sink
#[derive(Clone)]
pub(crate) struct FileSinkSender {
    tx: mpsc::UnboundedSender<Command>,
}

impl FileSinkSender {
    /// Queue an entry; dropped silently if the writer has stopped
    pub fn append(&self, entry: String) {
        let _ = self.tx.send(Command::Append(entry));
    }

    /// Flush everything queued before this call
    pub async fn flush(&self) -> Result<(), StorageError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send(Command::Flush(reply_tx)).is_err() {
            return Ok(());
        }
        reply_rx.await.unwrap_or(Ok(()))
    }

    /// Entries still waiting to be written
    pub async fn pending(&self) -> Vec<String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send(Command::Snapshot(reply_tx)).is_err() {
            return Vec::new();
        }
        reply_rx.await.unwrap_or_default()
    }
}

/// Handle to a running file sink
pub(crate) struct FileSinkHandle {
    sender: FileSinkSender,
    task: JoinHandle<()>,
    path: String,
}

impl FileSinkHandle {
    /// Start the writer task. The session banner is written immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        storage: Arc<dyn Storage>,
        path: String,
        settings: BufferSettings,
        console: Arc<dyn ConsoleSink>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let manager = BufferManager {
            storage,
            path: path.clone(),
            pending: Vec::new(),
            settings,
            auto_flush_at: settings.capacity_threshold.max(1),
            console,
        };
        let task = tokio::spawn(manager.run(rx));

        Self {
            sender: FileSinkSender { tx },
            task,
            path,
        }
    }

    pub fn sender(&self) -> FileSinkSender {
        self.sender.clone()
    }

    pub fn append(&self, entry: String) {
        self.sender.append(entry);
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Flush what is pending, then stop the writer task
    pub async fn shutdown(self) -> Result<(), StorageError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let result = if self.sender.tx.send(Command::Shutdown(reply_tx)).is_ok() {
            reply_rx.await.unwrap_or(Ok(()))
        } else {
            Ok(())
        };
        let _ = self.task.await;
        result
    }
}

/// Owner of the pending buffer, running inside the writer task
struct BufferManager {
    storage: Arc<dyn Storage>,
    path: String,
    pending: Vec<String>,
    settings: BufferSettings,
    /// Pending length at which the next automatic flush is attempted
    auto_flush_at: usize,
    console: Arc<dyn ConsoleSink>,
}

impl BufferManager {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        self.pending.push(format::session_banner(&Utc::now()));
        let _ = self.flush_reporting().await;

        while let Some(command) = rx.recv().await {
            match command {
                Command::Append(entry) => {
                    self.pending.push(entry);
                    if self.pending.len() >= self.auto_flush_at {
                        let _ = self.flush_reporting().await;
                    }
                }
                Command::Flush(reply) => {
                    let _ = reply.send(self.flush_reporting().await);
                }
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.pending.clone());
                }
                Command::Shutdown(reply) => {
                    let _ = reply.send(self.flush_reporting().await);
                    return;
                }
            }
        }

        // Every sender dropped without an explicit shutdown
        let _ = self.flush_reporting().await;
    }

    /// Flush, reporting failures to the console sink only
    async fn flush_reporting(&mut self) -> Result<(), StorageError> {
        let count = self.pending.len();
        let capacity = self.settings.capacity_threshold.max(1);
        let result = self.flush().await;
        // After a failure, wait for another full batch before retrying automatically
        self.auto_flush_at = match &result {
            Ok(()) => capacity,
            Err(_) => count + capacity,
        };
        if let Err(e) = &result {
            self.console.write(
                Level::Warn,
                &format!(
                    "[LOGGER] Failed to flush {} log entries to {}: {}",
                    count, self.path, e
                ),
                &[],
            );
        }
        result
    }

    async fn flush(&mut self) -> Result<(), StorageError> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let batch = self.pending.concat();
        let content = if self.storage.exists(&self.path).await? {
            let stat = self.storage.stat(&self.path).await?;
            if stat.size > self.settings.rotation_size_bytes {
                debug!(path = %self.path, size = stat.size, "Rotating log file");
                let mut content =
                    format::rotation_banner(&Utc::now(), self.settings.rotation_size_bytes);
                content.push_str(&batch);
                content
            } else {
                let mut content = self.storage.read(&self.path).await?;
                content.push_str(&batch);
                content
            }
        } else {
            batch
        };

        self.storage.write(&self.path, &content).await?;
        debug!(path = %self.path, entries = self.pending.len(), "Flushed log buffer");
        self.pending.clear();
        Ok(())
    }
}
