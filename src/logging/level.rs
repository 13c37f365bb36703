//! Components and levels
//!
//! Both are closed enumerations: referencing an unknown component from code is a
//! compile error, and names coming from configuration are parsed with `FromStr`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Subsystem that owns a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Main,
    Modal,
    Api,
    Settings,
    Ui,
    Events,
    General,
}

impl Component {
    /// Every component, in table order
    pub const ALL: [Component; 7] = [
        Component::Main,
        Component::Modal,
        Component::Api,
        Component::Settings,
        Component::Ui,
        Component::Events,
        Component::General,
    ];

    /// Number of components
    pub const COUNT: usize = Self::ALL.len();

    /// Configuration name (lower case)
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Main => "main",
            Component::Modal => "modal",
            Component::Api => "api",
            Component::Settings => "settings",
            Component::Ui => "ui",
            Component::Events => "events",
            Component::General => "general",
        }
    }

    /// Label used in formatted output
    pub fn label(&self) -> &'static str {
        match self {
            Component::Main => "MAIN",
            Component::Modal => "MODAL",
            Component::Api => "API",
            Component::Settings => "SETTINGS",
            Component::Ui => "UI",
            Component::Events => "EVENTS",
            Component::General => "GENERAL",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Component::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LogError::UnknownComponent(s.to_string()))
    }
}

/// Severity of a record, ordered `Trace < Info < Warn < Error`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Info,
    #[default]
    Warn,
    Error,
}

impl Level {
    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // "debug" is accepted as an alias for the trace level
            "trace" | "debug" => Ok(Level::Trace),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(LogError::UnknownLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert_eq!(Level::default(), Level::Warn);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!("INFO".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Trace);
        assert_eq!(
            "verbose".parse::<Level>(),
            Err(LogError::UnknownLevel("verbose".to_string()))
        );
    }

    #[test]
    fn test_parse_component() {
        for component in Component::ALL {
            assert_eq!(component.as_str().parse::<Component>().unwrap(), component);
        }
        assert_eq!("UI".parse::<Component>().unwrap(), Component::Ui);
        assert_eq!(
            "network".parse::<Component>(),
            Err(LogError::UnknownComponent("network".to_string()))
        );
    }

    #[test]
    fn test_component_index_matches_table_order() {
        for (i, component) in Component::ALL.iter().enumerate() {
            assert_eq!(component.index(), i);
        }
    }
}
