//! Shared dependency scope negotiated by every loaded container.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

/// Structured errors for shared-scope negotiation.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("shared dependency '{name}' is not provided")]
    Missing { name: String },

    #[error("shared dependency '{name}' has an unexpected type")]
    TypeMismatch { name: String },

    #[error("shared dependency '{name}' version conflict: active '{active}', offered '{offered}'")]
    VersionConflict {
        name: String,
        active: String,
        offered: String,
    },
}

struct ScopeEntry {
    version: String,
    instance: Arc<dyn Any + Send + Sync>,
}

/// A mapping from dependency name to a version-tagged singleton instance,
/// shared by reference across all loaded containers.
///
/// The first registration of a name wins: a later `provide` of the same name
/// and version returns the already-active instance, so exactly one copy of a
/// shared dependency is live at a time. Offering a different version is a
/// negotiation failure, not a silent replacement.
#[derive(Default)]
pub struct SharedScope {
    entries: DashMap<String, ScopeEntry>,
}

impl SharedScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared singleton, returning the active instance for `name`
    /// (the offered one if the slot was vacant, the existing one otherwise).
    pub fn provide<T>(&self, name: &str, version: &str, instance: Arc<T>) -> Result<Arc<T>, ScopeError>
    where
        T: Any + Send + Sync,
    {
        let entry = self.entries.entry(name.to_string()).or_insert_with(|| ScopeEntry {
            version: version.to_string(),
            instance: instance.clone(),
        });

        if entry.version != version {
            return Err(ScopeError::VersionConflict {
                name: name.to_string(),
                active: entry.version.clone(),
                offered: version.to_string(),
            });
        }

        entry
            .instance
            .clone()
            .downcast::<T>()
            .map_err(|_| ScopeError::TypeMismatch {
                name: name.to_string(),
            })
    }

    /// Resolve a shared singleton by name.
    pub fn resolve<T>(&self, name: &str) -> Result<Arc<T>, ScopeError>
    where
        T: Any + Send + Sync,
    {
        let entry = self.entries.get(name).ok_or_else(|| ScopeError::Missing {
            name: name.to_string(),
        })?;
        entry
            .instance
            .clone()
            .downcast::<T>()
            .map_err(|_| ScopeError::TypeMismatch {
                name: name.to_string(),
            })
    }

    /// Version tag of the active instance under `name`, if any.
    pub fn version_of(&self, name: &str) -> Option<String> {
        self.entries.get(name).map(|e| e.version.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of `(name, version)` pairs, sorted by name. Used to compare
    /// scope state across differently-ordered initialization runs.
    pub fn fingerprint(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().version.clone()))
            .collect();
        pairs.sort();
        pairs
    }
}

impl std::fmt::Debug for SharedScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedScope")
            .field("entries", &self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provide_then_resolve_roundtrips() {
        let scope = SharedScope::new();
        let provided = scope.provide("counter", "1.0.0", Arc::new(41u64)).unwrap();
        assert_eq!(*provided, 41);

        let resolved: Arc<u64> = scope.resolve("counter").unwrap();
        assert_eq!(*resolved, 41);
    }

    #[test]
    fn first_registration_wins() {
        let scope = SharedScope::new();
        let first = scope.provide("counter", "1.0.0", Arc::new(1u64)).unwrap();
        let second = scope.provide("counter", "1.0.0", Arc::new(2u64)).unwrap();

        // Exactly one copy is active: the second provider got the first instance.
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 1);
    }

    #[test]
    fn version_conflict_is_rejected() {
        let scope = SharedScope::new();
        scope.provide("ui", "18.2.0", Arc::new("react")).unwrap();

        let err = scope.provide("ui", "17.0.0", Arc::new("react")).unwrap_err();
        match err {
            ScopeError::VersionConflict { active, offered, .. } => {
                assert_eq!(active, "18.2.0");
                assert_eq!(offered, "17.0.0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_and_mismatched_entries_error() {
        let scope = SharedScope::new();
        assert!(matches!(
            scope.resolve::<u64>("absent"),
            Err(ScopeError::Missing { .. })
        ));

        scope.provide("counter", "1.0.0", Arc::new(7u64)).unwrap();
        assert!(matches!(
            scope.resolve::<String>("counter"),
            Err(ScopeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn fingerprint_is_sorted_and_stable() {
        let scope = SharedScope::new();
        scope.provide("b", "2", Arc::new(0u8)).unwrap();
        scope.provide("a", "1", Arc::new(0u8)).unwrap();
        assert_eq!(
            scope.fingerprint(),
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
    }
}
