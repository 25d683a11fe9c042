//! Theme application side effect: named style variables on a global target.

use dashmap::DashMap;

use crate::config::Theme;

/// The process-wide style target themes are written to (the CSS
/// custom-property analogue).
pub trait StyleTarget: Send + Sync {
    fn set_variable(&self, name: &str, value: &str);

    fn get_variable(&self, name: &str) -> Option<String>;
}

/// In-memory style target; the shell renders from it and tests observe it.
#[derive(Default)]
pub struct MemoryStyleTarget {
    variables: DashMap<String, String>,
}

impl MemoryStyleTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl StyleTarget for MemoryStyleTarget {
    fn set_variable(&self, name: &str, value: &str) {
        self.variables.insert(name.to_string(), value.to_string());
    }

    fn get_variable(&self, name: &str) -> Option<String> {
        self.variables.get(name).map(|v| v.clone())
    }
}

/// Write a tenant theme to the target under the conventional variable names.
pub fn apply_theme(target: &dyn StyleTarget, theme: &Theme) {
    target.set_variable("--tenant-primary", &theme.primary);
    target.set_variable("--tenant-secondary", &theme.secondary);
    target.set_variable("--tenant-accent", &theme.accent);
    target.set_variable("--tenant-background", &theme.background);
    target.set_variable("--tenant-text", &theme.text);
}
