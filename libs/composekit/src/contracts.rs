use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use thiserror::Error;

use crate::scope::{ScopeError, SharedScope};

/// A mountable UI unit. Components take no props; anything they need is
/// captured at construction time (typically during container `init`).
pub trait Component: Send + Sync {
    fn render(&self) -> String;
}

/// Structured errors a container can produce from `init` / `get`.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("container initialization failed")]
    Init(#[source] anyhow::Error),
    #[error("exposed module '{0}' not found in container")]
    ModuleNotFound(String),
    #[error("shared scope negotiation failed")]
    Scope(#[from] ScopeError),
}

/// Outcome of a container initializer.
///
/// Containers written against a synchronous setup path return `Done`;
/// containers that have asynchronous setup return `Deferred`. The loader
/// normalizes both into a single awaited completion, so callers never need
/// to know which kind they got.
pub enum InitResult {
    Done(Result<(), ContainerError>),
    Deferred(BoxFuture<'static, Result<(), ContainerError>>),
}

impl InitResult {
    /// Shorthand for a successfully completed synchronous initializer.
    pub fn ready() -> Self {
        InitResult::Done(Ok(()))
    }
}

/// A deferred constructor for a module's exports. Invoked at most once per
/// load; the lazy wrapper caches the resolved module, never the factory.
pub struct Factory(Box<dyn FnOnce() -> ModuleExports + Send>);

impl Factory {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> ModuleExports + Send + 'static,
    {
        Self(Box::new(f))
    }

    pub fn invoke(self) -> ModuleExports {
        (self.0)()
    }
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory").finish_non_exhaustive()
    }
}

/// The record a factory yields: an optional conventional default-export slot
/// plus named exports.
#[derive(Default)]
pub struct ModuleExports {
    default: Option<Arc<dyn Component>>,
    named: Vec<(String, Arc<dyn Component>)>,
}

impl ModuleExports {
    pub fn with_default(component: Arc<dyn Component>) -> Self {
        Self {
            default: Some(component),
            named: Vec::new(),
        }
    }

    /// Attach a named export (builder style).
    pub fn export(mut self, name: impl Into<String>, component: Arc<dyn Component>) -> Self {
        self.named.push((name.into(), component));
        self
    }

    pub fn default_export(&self) -> Option<&Arc<dyn Component>> {
        self.default.as_ref()
    }

    /// Normalize the export shape into one mountable component: the default
    /// export when present, a sole named export otherwise, or the whole
    /// record rendered as a composite.
    pub fn into_component(mut self) -> Arc<dyn Component> {
        if let Some(default) = self.default.take() {
            return default;
        }
        if self.named.len() == 1 {
            return self.named.remove(0).1;
        }
        Arc::new(ExportsView { named: self.named })
    }
}

impl std::fmt::Debug for ModuleExports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.named.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("ModuleExports")
            .field("has_default", &self.default.is_some())
            .field("named", &names)
            .finish()
    }
}

/// Fallback view for a module without a conventional default export.
struct ExportsView {
    named: Vec<(String, Arc<dyn Component>)>,
}

impl Component for ExportsView {
    fn render(&self) -> String {
        if self.named.is_empty() {
            return "(module exposes no components)".to_string();
        }
        let mut out = String::new();
        for (name, component) in &self.named {
            out.push_str(&format!("[{name}]\n{}\n", component.render()));
        }
        out
    }
}

/// A runtime-registered namespace entry. This is the sole wire contract
/// between the shell and a remote: the entry's name plus the `init`/`get`
/// signatures must match exactly.
///
/// Containers live in the registry for the lifetime of the process; they are
/// replaced on re-registration, never destroyed. `init` must be safe to call
/// once per container lifetime and must not assume any ordering relative to
/// other containers' `init` calls.
#[async_trait]
pub trait RemoteContainer: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Negotiate shared dependencies and perform one-time setup.
    fn init(&self, scope: Arc<SharedScope>) -> InitResult;

    /// Retrieve the factory for an exposed module path (e.g. `"./App"`).
    async fn get(&self, module_path: &str) -> Result<Factory, ContainerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Text(&'static str);

    impl Component for Text {
        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn default_export_wins_normalization() {
        let exports = ModuleExports::with_default(Arc::new(Text("default")))
            .export("extra", Arc::new(Text("extra")));
        assert_eq!(exports.into_component().render(), "default");
    }

    #[test]
    fn sole_named_export_is_surfaced() {
        let exports = ModuleExports::default().export("only", Arc::new(Text("only view")));
        assert_eq!(exports.into_component().render(), "only view");
    }

    #[test]
    fn multiple_named_exports_render_as_composite() {
        let exports = ModuleExports::default()
            .export("a", Arc::new(Text("first")))
            .export("b", Arc::new(Text("second")));
        let rendered = exports.into_component().render();
        assert!(rendered.contains("[a]"));
        assert!(rendered.contains("first"));
        assert!(rendered.contains("[b]"));
        assert!(rendered.contains("second"));
    }

    #[test]
    fn empty_exports_render_placeholder() {
        let rendered = ModuleExports::default().into_component().render();
        assert!(rendered.contains("no components"));
    }

    #[test]
    fn factory_is_invoked_lazily() {
        let factory = Factory::new(|| ModuleExports::with_default(Arc::new(Text("made"))));
        let exports = factory.invoke();
        assert_eq!(exports.into_component().render(), "made");
    }
}
