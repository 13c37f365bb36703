//! Logging context and component loggers
//!
//! [`LogContext`] owns the filter table, the console sink and the optional
//! file sink. It is created once by the host and cloned into consumers; each
//! consumer asks it for a [`ComponentLogger`] bound to its component.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

use super::console::{ConsoleSink, TracingConsole};
use super::file_sink::{BufferSettings, FileSinkHandle, FileSinkSender};
use super::filter::FilterTable;
use super::format;
use super::gate::TRACE_ENABLED;
use super::level::{Component, Level};
use super::record::{ExtraArg, LogRecord};
use crate::config::Config;
use crate::error::{LogError, StorageError};
use crate::storage::Storage;

/// Default destination path handed to the storage collaborator
pub const DEFAULT_LOG_PATH: &str = "scopelog.log";

struct Inner {
    filters: RwLock<FilterTable>,
    console: Arc<dyn ConsoleSink>,
    file: RwLock<Option<FileSinkHandle>>,
    default_path: String,
    buffer: BufferSettings,
}

/// Shared logging state
#[derive(Clone)]
pub struct LogContext {
    inner: Arc<Inner>,
}

/// Builder for [`LogContext`]
pub struct LogContextBuilder {
    console: Arc<dyn ConsoleSink>,
    default_path: String,
    buffer: BufferSettings,
}

impl Default for LogContextBuilder {
    fn default() -> Self {
        Self {
            console: Arc::new(TracingConsole),
            default_path: DEFAULT_LOG_PATH.to_string(),
            buffer: BufferSettings::default(),
        }
    }
}

impl LogContextBuilder {
    /// Console sink receiving every accepted record (default: `tracing`)
    pub fn console(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = console;
        self
    }

    /// Path used by `init_file_logging` when none is given
    pub fn default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = path.into();
        self
    }

    pub fn buffer_settings(mut self, settings: BufferSettings) -> Self {
        self.buffer = settings;
        self
    }

    pub fn build(self) -> LogContext {
        LogContext {
            inner: Arc::new(Inner {
                filters: RwLock::new(FilterTable::new()),
                console: self.console,
                file: RwLock::new(None),
                default_path: self.default_path,
                buffer: self.buffer,
            }),
        }
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new()
    }
}

impl LogContext {
    /// Context with a `tracing` console and default thresholds
    pub fn new() -> Self {
        LogContextBuilder::default().build()
    }

    pub fn builder() -> LogContextBuilder {
        LogContextBuilder::default()
    }

    /// Build a context from configuration and apply its filter settings
    pub fn from_config(config: &Config, console: Arc<dyn ConsoleSink>) -> Result<Self, LogError> {
        let ctx = Self::builder()
            .console(console)
            .default_path(config.file.path.clone())
            .buffer_settings(config.file.buffer_settings())
            .build();
        ctx.apply_config(config)?;
        Ok(ctx)
    }

    /// Apply the enable switch and per-component levels from configuration.
    ///
    /// All names are validated before anything is changed.
    pub fn apply_config(&self, config: &Config) -> Result<(), LogError> {
        let resolved = config.resolve_components()?;

        self.set_global_enabled(config.enabled);
        for (component, level, tags) in resolved {
            let tags: Vec<&str> = tags.iter().map(String::as_str).collect();
            self.set_component_level(component, level, Some(tags.as_slice()));
        }
        Ok(())
    }

    /// Create a logger bound to `component`
    pub fn component_logger(&self, component: Component) -> ComponentLogger {
        ComponentLogger {
            component,
            ctx: self.clone(),
        }
    }

    /// Whether a record would be emitted; no side effects
    pub fn should_emit(&self, component: Component, level: Level, tags: &[&str]) -> bool {
        self.inner
            .filters
            .read()
            .map(|f| f.should_emit(component, level, tags))
            .unwrap_or(false)
    }

    /// Set a component's minimum level; non-empty `tags` install a tag filter,
    /// `None` or empty clears it
    pub fn set_component_level(&self, component: Component, level: Level, tags: Option<&[&str]>) {
        if let Ok(mut filters) = self.inner.filters.write() {
            filters.set_level(component, level, tags);
        }
    }

    pub fn component_level(&self, component: Component) -> Level {
        self.inner
            .filters
            .read()
            .map(|f| f.level(component))
            .unwrap_or_default()
    }

    pub fn clear_tag_filters(&self, component: Component) {
        if let Ok(mut filters) = self.inner.filters.write() {
            filters.clear_tag_filters(component);
        }
    }

    pub fn clear_all_tag_filters(&self) {
        if let Ok(mut filters) = self.inner.filters.write() {
            filters.clear_all_tag_filters();
        }
    }

    /// Allowed trace tags of a component, if a filter is installed
    pub fn tag_filters(&self, component: Component) -> Option<BTreeSet<String>> {
        self.inner
            .filters
            .read()
            .ok()
            .and_then(|f| f.tag_filters(component).cloned())
    }

    /// Master kill switch, independent of per-component levels
    pub fn set_global_enabled(&self, enabled: bool) {
        if let Ok(mut filters) = self.inner.filters.write() {
            filters.set_enabled(enabled);
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner
            .filters
            .read()
            .map(|f| f.is_enabled())
            .unwrap_or(false)
    }

    /// Start buffering accepted records to `path` (or the default path) through
    /// `storage`. A session banner is written immediately. An already running
    /// file sink is flushed and stopped first.
    pub async fn init_file_logging(&self, storage: Arc<dyn Storage>, path: Option<&str>) {
        let _ = self.disable_file_logging().await;

        let path = path.unwrap_or(self.inner.default_path.as_str()).to_string();
        let handle = FileSinkHandle::spawn(
            storage,
            path.clone(),
            self.inner.buffer,
            Arc::clone(&self.inner.console),
        );

        if let Ok(mut file) = self.inner.file.write() {
            *file = Some(handle);
        }
        info!(path = %path, "File logging enabled");
    }

    /// Flush pending entries and stop the file sink. No-op when disabled.
    pub async fn disable_file_logging(&self) -> Result<(), StorageError> {
        let handle = self.inner.file.write().ok().and_then(|mut f| f.take());
        match handle {
            Some(handle) => {
                let path = handle.path().to_string();
                let result = handle.shutdown().await;
                info!(path = %path, "File logging disabled");
                result
            }
            None => Ok(()),
        }
    }

    /// Write everything queued so far. No-op when file logging is disabled.
    pub async fn flush(&self) -> Result<(), StorageError> {
        match self.file_sender() {
            Some(sender) => sender.flush().await,
            None => Ok(()),
        }
    }

    pub fn is_file_logging_enabled(&self) -> bool {
        self.inner
            .file
            .read()
            .map(|f| f.is_some())
            .unwrap_or(false)
    }

    /// Formatted entries waiting for the next flush
    pub async fn pending_file_entries(&self) -> Vec<String> {
        match self.file_sender() {
            Some(sender) => sender.pending().await,
            None => Vec::new(),
        }
    }

    fn file_sender(&self) -> Option<FileSinkSender> {
        self.inner
            .file
            .read()
            .ok()
            .and_then(|f| f.as_ref().map(FileSinkHandle::sender))
    }

    fn log(
        &self,
        component: Component,
        level: Level,
        message: &str,
        tags: &[&str],
        extra: &[&dyn ExtraArg],
    ) {
        if !self.should_emit(component, level, tags) {
            return;
        }
        let record = LogRecord::new(component, level, message, tags, extra);

        self.inner
            .console
            .write(record.level, &format::console_line(&record), record.extra);

        match self.inner.file.read() {
            Ok(file) => {
                if let Some(handle) = file.as_ref() {
                    handle.append(format::file_entry(&record));
                }
            }
            Err(_) => warn!("File sink lock poisoned, record not queued"),
        }
    }
}

/// Logger bound to a single component
#[derive(Clone)]
pub struct ComponentLogger {
    component: Component,
    ctx: LogContext,
}

impl ComponentLogger {
    /// Debug-only detail, optionally narrowed by tags.
    ///
    /// Compiled to a no-op by the `strip-trace` feature.
    #[inline]
    pub fn trace(&self, message: &str, tags: &[&str], extra: &[&dyn ExtraArg]) {
        if !TRACE_ENABLED {
            return;
        }
        self.ctx.log(self.component, Level::Trace, message, tags, extra);
    }

    pub fn info(&self, message: &str, extra: &[&dyn ExtraArg]) {
        self.ctx.log(self.component, Level::Info, message, &[], extra);
    }

    pub fn warn(&self, message: &str, extra: &[&dyn ExtraArg]) {
        self.ctx.log(self.component, Level::Warn, message, &[], extra);
    }

    pub fn error(&self, message: &str, extra: &[&dyn ExtraArg]) {
        self.ctx.log(self.component, Level::Error, message, &[], extra);
    }
}
