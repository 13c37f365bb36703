//! Level × component × tag filtering
//!
//! [`FilterTable`] holds one [`ComponentConfig`] per component plus a global
//! enable switch, and decides whether a record is observable. Tag filtering
//! only ever applies to trace records.

use std::collections::BTreeSet;

use super::level::{Component, Level};

/// Per-component filter settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Minimum level this component emits
    pub level: Level,
    /// Allowed tags for trace records; never empty when present
    pub tag_filter: Option<BTreeSet<String>>,
}

/// Filter state for every component
#[derive(Debug, Clone)]
pub struct FilterTable {
    enabled: bool,
    configs: [ComponentConfig; Component::COUNT],
}

impl Default for FilterTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterTable {
    /// Create a table with logging enabled and every component at `warn`
    pub fn new() -> Self {
        Self {
            enabled: true,
            configs: std::array::from_fn(|_| ComponentConfig::default()),
        }
    }

    /// Decide whether a record would be emitted. Pure; safe to call speculatively.
    pub fn should_emit(&self, component: Component, level: Level, tags: &[&str]) -> bool {
        if !self.enabled {
            return false;
        }

        let config = &self.configs[component.index()];
        if level < config.level {
            return false;
        }

        if level != Level::Trace {
            return true;
        }

        match &config.tag_filter {
            Some(filter) => tags.iter().any(|tag| filter.contains(*tag)),
            None => true,
        }
    }

    /// Set a component's minimum level. Non-empty `tags` install a tag filter;
    /// `None` or an empty slice clears it.
    pub fn set_level(&mut self, component: Component, level: Level, tags: Option<&[&str]>) {
        let config = &mut self.configs[component.index()];
        config.level = level;
        config.tag_filter = tags
            .map(|tags| tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>())
            .filter(|set| !set.is_empty());
    }

    /// Current minimum level of a component
    pub fn level(&self, component: Component) -> Level {
        self.configs[component.index()].level
    }

    /// Remove a component's tag filter, keeping its level
    pub fn clear_tag_filters(&mut self, component: Component) {
        self.configs[component.index()].tag_filter = None;
    }

    /// Remove every component's tag filter
    pub fn clear_all_tag_filters(&mut self) {
        for config in &mut self.configs {
            config.tag_filter = None;
        }
    }

    /// Allowed tags for a component, if a filter is installed
    pub fn tag_filters(&self, component: Component) -> Option<&BTreeSet<String>> {
        self.configs[component.index()].tag_filter.as_ref()
    }

    /// Master switch, independent of per-component levels
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [Level; 4] = [Level::Trace, Level::Info, Level::Warn, Level::Error];

    #[test]
    fn test_default_level_is_warn() {
        let table = FilterTable::new();
        assert!(!table.should_emit(Component::Api, Level::Trace, &[]));
        assert!(!table.should_emit(Component::Api, Level::Info, &[]));
        assert!(table.should_emit(Component::Api, Level::Warn, &[]));
        assert!(table.should_emit(Component::Api, Level::Error, &[]));
    }

    #[test]
    fn test_level_monotonicity() {
        let mut table = FilterTable::new();
        for configured in LEVELS {
            table.set_level(Component::Main, configured, None);
            for (i, lower) in LEVELS.iter().enumerate() {
                for higher in &LEVELS[i..] {
                    if table.should_emit(Component::Main, *lower, &[]) {
                        assert!(table.should_emit(Component::Main, *higher, &[]));
                    }
                }
            }
        }
    }

    #[test]
    fn test_tag_filter_or_semantics() {
        let mut table = FilterTable::new();
        table.set_level(Component::Ui, Level::Trace, Some(&["a", "b"]));

        assert!(table.should_emit(Component::Ui, Level::Trace, &["b", "c"]));
        assert!(!table.should_emit(Component::Ui, Level::Trace, &["c"]));
        assert!(!table.should_emit(Component::Ui, Level::Trace, &[]));
    }

    #[test]
    fn test_untagged_trace_without_filter() {
        let mut table = FilterTable::new();
        assert!(!table.should_emit(Component::Modal, Level::Trace, &[]));

        table.set_level(Component::Modal, Level::Trace, None);
        assert!(table.should_emit(Component::Modal, Level::Trace, &[]));
        assert!(table.should_emit(Component::Modal, Level::Trace, &["anything"]));
    }

    #[test]
    fn test_tag_filter_ignored_for_non_trace_levels() {
        let mut table = FilterTable::new();
        table.set_level(Component::Events, Level::Trace, Some(&["focus"]));

        assert!(table.should_emit(Component::Events, Level::Info, &[]));
        assert!(table.should_emit(Component::Events, Level::Warn, &["other"]));
        assert!(table.should_emit(Component::Events, Level::Error, &[]));
    }

    #[test]
    fn test_global_disable_overrides_everything() {
        let mut table = FilterTable::new();
        table.set_level(Component::General, Level::Trace, None);
        table.set_enabled(false);

        for component in Component::ALL {
            for level in LEVELS {
                assert!(!table.should_emit(component, level, &[]));
                assert!(!table.should_emit(component, level, &["tag"]));
            }
        }

        table.set_enabled(true);
        assert!(table.should_emit(Component::General, Level::Trace, &[]));
    }

    #[test]
    fn test_empty_tags_clear_filter() {
        let mut table = FilterTable::new();
        table.set_level(Component::Api, Level::Trace, Some(&["net"]));
        assert_eq!(table.tag_filters(Component::Api).map(|f| f.len()), Some(1));

        table.set_level(Component::Api, Level::Trace, Some(&[]));
        assert!(table.tag_filters(Component::Api).is_none());

        table.set_level(Component::Api, Level::Trace, Some(&["net"]));
        table.set_level(Component::Api, Level::Info, None);
        assert!(table.tag_filters(Component::Api).is_none());
        assert_eq!(table.level(Component::Api), Level::Info);
    }

    #[test]
    fn test_clear_tag_filters() {
        let mut table = FilterTable::new();
        table.set_level(Component::Ui, Level::Trace, Some(&["a"]));
        table.set_level(Component::Api, Level::Trace, Some(&["b"]));

        table.clear_tag_filters(Component::Ui);
        assert!(table.tag_filters(Component::Ui).is_none());
        assert!(table.tag_filters(Component::Api).is_some());
        assert_eq!(table.level(Component::Ui), Level::Trace);

        table.clear_all_tag_filters();
        assert!(Component::ALL
            .iter()
            .all(|c| table.tag_filters(*c).is_none()));
    }
}
