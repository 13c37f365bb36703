//! scopelog - component-scoped, tag-filterable logging
//!
//! This library provides a [`LogContext`] that filters records per component,
//! writes them to a console sink and buffers them to a rotating log file.

pub mod config;
pub mod error;
pub mod logging;
pub mod storage;

pub use error::{LogError, StorageError};
pub use logging::{
    BufferSettings, Component, ComponentLogger, ConsoleBuffer, ConsoleSink, ExtraArg, Level,
    LogContext, TracingConsole,
};
