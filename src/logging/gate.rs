//! Build-mode gate for trace logging
//!
//! Building with the `strip-trace` feature removes trace logging from the
//! artifact. The [`trace!`](crate::trace) macro then expands to an empty block,
//! so neither its message literal nor its arguments reach the compiled output.
//! [`ComponentLogger::trace`](crate::ComponentLogger::trace) returns on the
//! constant [`TRACE_ENABLED`] at its first statement; the optimizer folds the
//! body away, but arguments a caller computes before the call are still
//! evaluated. Prefer the macro in hot paths.

/// Whether trace-level logging is compiled into this build
pub const TRACE_ENABLED: bool = !cfg!(feature = "strip-trace");

/// Log a trace record through a [`ComponentLogger`](crate::ComponentLogger)
///
/// ```
/// # use scopelog::{Component, Level, LogContext};
/// let ctx = LogContext::new();
/// ctx.set_component_level(Component::Ui, Level::Trace, Some(&["validation"]));
/// let log = ctx.component_logger(Component::Ui);
///
/// scopelog::trace!(log, "rendered {} rows", 12);
/// scopelog::trace!(log, tags: ["validation"], "field {} ok", "title");
/// ```
#[cfg(not(feature = "strip-trace"))]
#[macro_export]
macro_rules! trace {
    ($logger:expr, tags: [$($tag:expr),* $(,)?], $($arg:tt)+) => {
        $logger.trace(&::std::format!($($arg)+), &[$($tag),*], &[])
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(&::std::format!($($arg)+), &[], &[])
    };
}

/// Log a trace record; compiled out by the `strip-trace` feature
#[cfg(feature = "strip-trace")]
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {{
        let _ = &$logger;
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::console::ConsoleBuffer;
    use crate::logging::level::{Component, Level};
    use crate::LogContext;
    use std::cell::Cell;
    use std::sync::Arc;

    fn context() -> (LogContext, Arc<ConsoleBuffer>) {
        let console = Arc::new(ConsoleBuffer::new(100));
        let ctx = LogContext::builder().console(console.clone()).build();
        ctx.set_component_level(Component::General, Level::Trace, None);
        (ctx, console)
    }

    #[cfg(not(feature = "strip-trace"))]
    #[test]
    fn test_trace_macro_emits_in_debug_builds() {
        let (ctx, console) = context();
        let log = ctx.component_logger(Component::General);

        crate::trace!(log, "value is {}", 7);
        crate::trace!(log, tags: ["b", "a"], "tagged");

        assert!(TRACE_ENABLED);
        assert_eq!(console.lines(), vec!["[GENERAL] value is 7", "[GENERAL][a,b] tagged"]);
    }

    #[cfg(feature = "strip-trace")]
    #[test]
    fn test_trace_is_compiled_out() {
        let (ctx, console) = context();
        let log = ctx.component_logger(Component::General);
        let evaluated = Cell::new(false);

        crate::trace!(log, "side effect {}", {
            evaluated.set(true);
            1
        });
        log.trace("direct", &[], &[]);

        assert!(!TRACE_ENABLED);
        assert!(!evaluated.get());
        assert!(console.is_empty());
    }

    #[cfg(not(feature = "strip-trace"))]
    #[test]
    fn test_trace_macro_arguments_evaluated_when_enabled() {
        let (ctx, _console) = context();
        let log = ctx.component_logger(Component::General);
        let evaluated = Cell::new(false);

        crate::trace!(log, "side effect {}", {
            evaluated.set(true);
            1
        });

        assert!(evaluated.get());
    }
}
