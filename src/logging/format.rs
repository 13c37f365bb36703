//! Text rendering for the console and file sinks

use chrono::{DateTime, SecondsFormat, Utc};

use super::record::LogRecord;

/// Placeholder prefix written when `extra` cannot be serialized
pub const UNSERIALIZABLE_PREFIX: &str = "[Unserializable arguments";

/// Render the canonical `[COMPONENT][tag1,tag2] message` line
pub fn console_line(record: &LogRecord<'_>) -> String {
    let tags = record.canonical_tags();
    if tags.is_empty() {
        format!("[{}] {}", record.component.label(), record.message)
    } else {
        let tags: Vec<&str> = tags.into_iter().collect();
        format!(
            "[{}][{}] {}",
            record.component.label(),
            tags.join(","),
            record.message
        )
    }
}

/// Render a record for the file sink, including a trailing newline
///
/// `extra`, when present, is serialized as a JSON array on a continuation line.
pub fn file_entry(record: &LogRecord<'_>) -> String {
    let mut entry = format!(
        "[{}] [{}] {}\n",
        timestamp(&record.timestamp),
        record.level.as_str(),
        console_line(record)
    );

    if !record.extra.is_empty() {
        entry.push_str("  Arguments: ");
        entry.push_str(&serialize_extra(record));
        entry.push('\n');
    }

    entry
}

fn serialize_extra(record: &LogRecord<'_>) -> String {
    let values: serde_json::Result<Vec<serde_json::Value>> =
        record.extra.iter().map(|arg| arg.to_json()).collect();

    match values.and_then(|values| serde_json::to_string(&values)) {
        Ok(json) => json,
        Err(e) => format!("{}: {}]", UNSERIALIZABLE_PREFIX, e),
    }
}

/// Banner written when file logging starts
pub fn session_banner(at: &DateTime<Utc>) -> String {
    format!("=== Log session started {} ===\n", timestamp(at))
}

/// Banner written in place of history when the file is rotated
pub fn rotation_banner(at: &DateTime<Utc>, threshold: u64) -> String {
    format!(
        "=== Log rotated {}: previous content exceeded {} bytes ===\n",
        timestamp(at),
        threshold
    )
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::level::{Component, Level};
    use crate::logging::record::ExtraArg;
    use chrono::TimeZone;
    use std::collections::HashMap;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap()
    }

    #[test]
    fn test_console_line_without_tags() {
        let record = LogRecord::new(Component::Api, Level::Warn, "slow response", &[], &[]);
        assert_eq!(console_line(&record), "[API] slow response");
    }

    #[test]
    fn test_console_line_with_tags() {
        let tags = ["validation", "form", "validation"];
        let record = LogRecord::new(Component::Ui, Level::Trace, "checked", &tags, &[]);
        assert_eq!(console_line(&record), "[UI][form,validation] checked");
    }

    #[test]
    fn test_file_entry_without_extra() {
        let mut record = LogRecord::new(Component::Main, Level::Info, "loaded", &[], &[]);
        record.timestamp = fixed_time();
        assert_eq!(
            file_entry(&record),
            "[2026-01-21T14:30:45.000Z] [INFO] [MAIN] loaded\n"
        );
    }

    #[test]
    fn test_file_entry_with_extra() {
        let count = 3;
        let name = "notes.md";
        let extra: [&dyn ExtraArg; 2] = [&count, &name];
        let mut record = LogRecord::new(Component::Events, Level::Error, "failed", &[], &extra);
        record.timestamp = fixed_time();
        assert_eq!(
            file_entry(&record),
            "[2026-01-21T14:30:45.000Z] [ERROR] [EVENTS] failed\n  Arguments: [3,\"notes.md\"]\n"
        );
    }

    #[test]
    fn test_file_entry_with_unserializable_extra() {
        let mut map = HashMap::new();
        map.insert((1, 2), "pair");
        let extra: [&dyn ExtraArg; 1] = [&map];
        let record = LogRecord::new(Component::Settings, Level::Warn, "odd", &[], &extra);

        let entry = file_entry(&record);
        assert!(entry.contains("[WARN] [SETTINGS] odd\n"));
        assert!(entry.contains(&format!("  Arguments: {}", UNSERIALIZABLE_PREFIX)));
        assert!(entry.ends_with("]\n"));
    }

    #[test]
    fn test_banners_are_marked() {
        let session = session_banner(&fixed_time());
        assert!(session.starts_with("=== Log session started 2026-01-21T14:30:45.000Z"));
        assert!(session.ends_with("===\n"));

        let rotation = rotation_banner(&fixed_time(), 1024);
        assert!(rotation.starts_with("=== Log rotated"));
        assert!(rotation.contains("1024 bytes"));
    }
}
