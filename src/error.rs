//! Error types for scopelog

use thiserror::Error;

/// Errors raised while configuring the logger
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LogError {
    /// A component name outside the closed set of components
    #[error("unknown log component '{0}'")]
    UnknownComponent(String),

    /// A level name that is not trace, info, warn or error
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}

/// Errors reported by a [`crate::storage::Storage`] backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// The requested path does not exist
    #[error("file not found: {0}")]
    NotFound(String),

    /// IO operation failed
    #[error("{0}: {1}")]
    Io(&'static str, #[source] std::io::Error),

    /// The backend refused the operation
    #[error("storage rejected {op} on {path}: {reason}")]
    Rejected {
        op: &'static str,
        path: String,
        reason: String,
    },
}
