//! Component-scoped logging
//!
//! Records are filtered by level, component and (for trace records) tags,
//! written immediately to a console sink, and optionally buffered to a
//! rotating file through a host-provided storage backend.

mod console;
mod context;
mod file_sink;
mod filter;
mod format;
mod gate;
mod level;
mod record;

pub use console::{ConsoleBuffer, ConsoleEntry, ConsoleSink, TracingConsole};
pub use context::{ComponentLogger, LogContext, LogContextBuilder, DEFAULT_LOG_PATH};
pub use file_sink::{BufferSettings, DEFAULT_CAPACITY_THRESHOLD, DEFAULT_ROTATION_SIZE_BYTES};
pub use filter::FilterTable;
pub use format::{console_line, file_entry};
pub use gate::TRACE_ENABLED;
pub use level::{Component, Level};
pub use record::{ExtraArg, LogRecord};
