//! Log records and auxiliary arguments

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::level::{Component, Level};

/// An auxiliary value attached to a record
///
/// The console sink renders it with `Debug`; the file sink serializes it as JSON.
/// Implemented for every `Serialize + Debug` type.
pub trait ExtraArg: Send + Sync {
    /// Serialize for the file sink
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;

    /// Render for the console sink
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<T> ExtraArg for T
where
    T: Serialize + fmt::Debug + Send + Sync,
{
    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Debug for dyn ExtraArg + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_debug(f)
    }
}

/// A single log call, alive only for the duration of that call
#[derive(Debug)]
pub struct LogRecord<'a> {
    pub component: Component,
    pub level: Level,
    pub message: &'a str,
    pub tags: &'a [&'a str],
    pub extra: &'a [&'a dyn ExtraArg],
    pub timestamp: DateTime<Utc>,
}

impl<'a> LogRecord<'a> {
    /// Create a record stamped with the current time
    pub fn new(
        component: Component,
        level: Level,
        message: &'a str,
        tags: &'a [&'a str],
        extra: &'a [&'a dyn ExtraArg],
    ) -> Self {
        Self {
            component,
            level,
            message,
            tags,
            extra,
            timestamp: Utc::now(),
        }
    }

    /// Tags sorted and de-duplicated
    pub fn canonical_tags(&self) -> BTreeSet<&'a str> {
        self.tags.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_canonical_tags_dedupes_and_sorts() {
        let tags = ["b", "a", "b"];
        let record = LogRecord::new(Component::Ui, Level::Trace, "msg", &tags, &[]);
        let canonical: Vec<_> = record.canonical_tags().into_iter().collect();
        assert_eq!(canonical, vec!["a", "b"]);
    }

    #[test]
    fn test_extra_arg_json_and_debug() {
        let value = vec![1, 2, 3];
        let arg: &dyn ExtraArg = &value;
        assert_eq!(arg.to_json().unwrap(), serde_json::json!([1, 2, 3]));
        assert_eq!(format!("{:?}", arg), "[1, 2, 3]");
    }

    #[test]
    fn test_extra_arg_serialization_failure() {
        // JSON object keys must be strings
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        let arg: &dyn ExtraArg = &map;
        assert!(arg.to_json().is_err());
    }
}
