//! Console sinks
//!
//! The console sink receives every accepted record synchronously. `extra` is
//! passed through as separate arguments rather than folded into the line.

use std::collections::VecDeque;
use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::level::Level;
use super::record::ExtraArg;

/// Destination for immediate, level-aware output
pub trait ConsoleSink: Send + Sync {
    fn write(&self, level: Level, line: &str, extra: &[&dyn ExtraArg]);
}

/// Debug view over the `extra` arguments of a record
struct ExtraList<'a>(&'a [&'a dyn ExtraArg]);

impl fmt::Debug for ExtraList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Forwards records to `tracing`, trace records at the debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingConsole;

impl ConsoleSink for TracingConsole {
    fn write(&self, level: Level, line: &str, extra: &[&dyn ExtraArg]) {
        let extra = ExtraList(extra);
        if extra.0.is_empty() {
            match level {
                Level::Trace => tracing::debug!(target: "scopelog", "{}", line),
                Level::Info => tracing::info!(target: "scopelog", "{}", line),
                Level::Warn => tracing::warn!(target: "scopelog", "{}", line),
                Level::Error => tracing::error!(target: "scopelog", "{}", line),
            }
        } else {
            match level {
                Level::Trace => tracing::debug!(target: "scopelog", extra = ?extra, "{}", line),
                Level::Info => tracing::info!(target: "scopelog", extra = ?extra, "{}", line),
                Level::Warn => tracing::warn!(target: "scopelog", extra = ?extra, "{}", line),
                Level::Error => tracing::error!(target: "scopelog", extra = ?extra, "{}", line),
            }
        }
    }
}

/// A line captured by [`ConsoleBuffer`]
#[derive(Debug, Clone)]
pub struct ConsoleEntry {
    /// Timestamp when the line was written
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// Formatted `[COMPONENT][tags] message` line
    pub line: String,
    /// `Debug` rendering of each extra argument
    pub extra: Vec<String>,
}

/// Thread-safe ring buffer console, for embedding hosts and tests
pub struct ConsoleBuffer {
    entries: RwLock<VecDeque<ConsoleEntry>>,
    max_entries: usize,
}

impl ConsoleBuffer {
    /// Create a buffer keeping at most `max_entries` lines
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(max_entries.min(1024))),
            max_entries,
        }
    }

    /// Get all entries as a vector
    pub fn all_entries(&self) -> Vec<ConsoleEntry> {
        self.entries
            .read()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get just the formatted lines
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|e| e.iter().map(|entry| entry.line.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl ConsoleSink for ConsoleBuffer {
    fn write(&self, level: Level, line: &str, extra: &[&dyn ExtraArg]) {
        if self.max_entries == 0 {
            return;
        }
        let entry = ConsoleEntry {
            timestamp: Utc::now(),
            level,
            line: line.to_string(),
            extra: extra.iter().map(|arg| format!("{:?}", arg)).collect(),
        };

        if let Ok(mut entries) = self.entries.write() {
            if entries.len() >= self.max_entries {
                entries.pop_front();
            }
            entries.push_back(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_buffer_push_and_retrieve() {
        let buffer = ConsoleBuffer::new(100);

        buffer.write(Level::Info, "[MAIN] message 1", &[]);
        buffer.write(Level::Warn, "[MAIN] warning 1", &[]);
        buffer.write(Level::Error, "[MAIN] error 1", &[]);

        assert_eq!(buffer.len(), 3);
        let entries = buffer.all_entries();
        assert_eq!(entries[0].line, "[MAIN] message 1");
        assert_eq!(entries[1].level, Level::Warn);
        assert_eq!(entries[2].line, "[MAIN] error 1");
    }

    #[test]
    fn test_console_buffer_capacity() {
        let buffer = ConsoleBuffer::new(3);

        for i in 0..5 {
            buffer.write(Level::Info, &format!("msg {}", i), &[]);
        }

        assert_eq!(buffer.lines(), vec!["msg 2", "msg 3", "msg 4"]);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_console_buffer_zero_capacity_keeps_nothing() {
        let buffer = ConsoleBuffer::new(0);

        buffer.write(Level::Warn, "[API] dropped", &[]);
        buffer.write(Level::Error, "[API] dropped too", &[]);

        assert!(buffer.is_empty());
        assert!(buffer.lines().is_empty());
    }

    #[test]
    fn test_console_buffer_keeps_extra_separate() {
        let buffer = ConsoleBuffer::new(10);
        let payload = vec!["a", "b"];

        buffer.write(Level::Error, "[API] request failed", &[&payload, &404]);

        let entry = &buffer.all_entries()[0];
        assert_eq!(entry.line, "[API] request failed");
        assert_eq!(entry.extra, vec!["[\"a\", \"b\"]", "404"]);
    }

    #[test]
    fn test_tracing_console_does_not_panic_without_subscriber() {
        let console = TracingConsole;
        console.write(Level::Trace, "[UI] trace", &[]);
        console.write(Level::Error, "[UI] error", &[&1]);
    }
}
