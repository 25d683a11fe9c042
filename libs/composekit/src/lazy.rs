//! Lazy component wrapper: one load per wrapper instance, cancel-on-drop,
//! explicit retry from failure.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::contracts::Component;
use crate::errors::LoadError;
use crate::loader::{load_remote, LoadOptions};
use crate::registry::RegistryPort;
use crate::scope::SharedScope;

/// Per-wrapper load state machine.
///
/// Transitions are `Unloaded -> Pending -> {Ready | Failed}` with
/// `Failed -> Pending` reachable only through [`LazyComponent::retry`].
/// `Ready` is terminal for the wrapper instance; a remount gets a fresh
/// wrapper starting back at `Unloaded`.
#[derive(Clone)]
pub enum LoadState {
    Unloaded,
    Pending,
    Ready(Arc<dyn Component>),
    Failed(Arc<LoadError>),
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Ready(_) | LoadState::Failed(_))
    }
}

impl std::fmt::Debug for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadState::Unloaded => write!(f, "Unloaded"),
            LoadState::Pending => write!(f, "Pending"),
            LoadState::Ready(_) => write!(f, "Ready"),
            LoadState::Failed(e) => write!(f, "Failed({e})"),
        }
    }
}

struct LazyInner {
    registry: Arc<dyn RegistryPort>,
    scope: Arc<SharedScope>,
    name: String,
    module_path: String,
    opts: LoadOptions,
    state: watch::Sender<LoadState>,
    // Serializes the Unloaded/Failed -> Pending transition.
    start: parking_lot::Mutex<()>,
    cancel: CancellationToken,
}

/// An on-demand unit usable like any local component.
///
/// The underlying load is triggered at most once per wrapper instance;
/// concurrent [`resolve`](LazyComponent::resolve) callers before resolution
/// share the single in-flight load. Dropping the wrapper cancels an in-flight
/// load and the eventual settlement is discarded.
pub struct LazyComponent {
    inner: Arc<LazyInner>,
}

impl LazyComponent {
    pub fn new(
        registry: Arc<dyn RegistryPort>,
        scope: Arc<SharedScope>,
        name: impl Into<String>,
        module_path: impl Into<String>,
        opts: LoadOptions,
    ) -> Self {
        let (state, _) = watch::channel(LoadState::Unloaded);
        Self {
            inner: Arc::new(LazyInner {
                registry,
                scope,
                name: name.into(),
                module_path: module_path.into(),
                opts,
                state,
                start: parking_lot::Mutex::new(()),
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn remote_name(&self) -> &str {
        &self.inner.name
    }

    /// Current load state (cheap snapshot).
    pub fn state(&self) -> LoadState {
        self.inner.state.borrow().clone()
    }

    /// Watch the state machine, e.g. to re-render fallbacks on transitions.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.inner.state.subscribe()
    }

    /// Trigger the load if this wrapper has never started one.
    pub fn ensure_started(&self) {
        let _guard = self.inner.start.lock();
        if !matches!(&*self.inner.state.borrow(), LoadState::Unloaded) {
            return;
        }
        self.inner.state.send_replace(LoadState::Pending);
        spawn_load(self.inner.clone());
    }

    /// Clear a failure and re-attempt the load. Returns `false` from any
    /// state other than `Failed`.
    pub fn retry(&self) -> bool {
        let _guard = self.inner.start.lock();
        if !matches!(&*self.inner.state.borrow(), LoadState::Failed(_)) {
            return false;
        }
        tracing::info!(remote = %self.inner.name, "Retrying failed remote load");
        self.inner.state.send_replace(LoadState::Pending);
        spawn_load(self.inner.clone());
        true
    }

    /// Trigger the load on first call and wait for a terminal state.
    pub async fn resolve(&self) -> Result<Arc<dyn Component>, Arc<LoadError>> {
        self.ensure_started();
        let mut rx = self.inner.state.subscribe();
        loop {
            {
                let state = rx.borrow_and_update();
                match &*state {
                    LoadState::Ready(component) => return Ok(component.clone()),
                    LoadState::Failed(err) => return Err(err.clone()),
                    LoadState::Unloaded | LoadState::Pending => {}
                }
            }
            if rx.changed().await.is_err() {
                return Err(Arc::new(LoadError::Cancelled {
                    name: self.inner.name.clone(),
                }));
            }
        }
    }
}

impl Drop for LazyComponent {
    fn drop(&mut self) {
        // Teardown: signal the in-flight task so its settlement becomes a no-op.
        self.inner.cancel.cancel();
    }
}

impl std::fmt::Debug for LazyComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyComponent")
            .field("remote", &self.inner.name)
            .field("module_path", &self.inner.module_path)
            .field("state", &self.state())
            .finish()
    }
}

fn spawn_load(inner: Arc<LazyInner>) {
    tokio::spawn(async move {
        if inner.cancel.is_cancelled() {
            return;
        }
        let load = load_remote(
            inner.registry.as_ref(),
            inner.scope.clone(),
            &inner.name,
            &inner.module_path,
            &inner.opts,
        );

        tokio::select! {
            _ = inner.cancel.cancelled() => {
                tracing::debug!(remote = %inner.name, "Remote load cancelled before settlement");
            }
            result = load => {
                if inner.cancel.is_cancelled() {
                    return;
                }
                let next = match result {
                    Ok(module) => LoadState::Ready(module.component),
                    Err(err) => {
                        tracing::warn!(remote = %inner.name, error = %err, "Remote load failed");
                        LoadState::Failed(Arc::new(err))
                    }
                };
                inner.state.send_replace(next);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{ContainerError, Factory, InitResult, ModuleExports, RemoteContainer};
    use crate::registry::{DiscoveryOptions, GlobalRegistry};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct Text(&'static str);

    impl Component for Text {
        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    /// Counts `get` calls so tests can assert single-flight behavior.
    struct CountingContainer {
        name: &'static str,
        get_calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl RemoteContainer for CountingContainer {
        fn name(&self) -> &str {
            self.name
        }

        fn init(&self, _scope: Arc<SharedScope>) -> InitResult {
            InitResult::ready()
        }

        async fn get(&self, module_path: &str) -> Result<Factory, ContainerError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            // Leave the suspension point in so concurrent resolvers overlap.
            tokio::time::sleep(Duration::from_millis(20)).await;
            match module_path {
                "./App" => Ok(Factory::new(|| {
                    ModuleExports::with_default(Arc::new(Text("board")))
                })),
                other => Err(ContainerError::ModuleNotFound(other.to_string())),
            }
        }
    }

    fn quick_opts() -> LoadOptions {
        LoadOptions {
            discovery: DiscoveryOptions {
                max_attempts: 4,
                interval: Duration::from_millis(50),
            },
            init_timeout: Duration::from_millis(1000),
        }
    }

    fn wrapper_for(
        registry: &Arc<GlobalRegistry>,
        name: &'static str,
    ) -> (LazyComponent, Arc<AtomicU32>) {
        let get_calls = Arc::new(AtomicU32::new(0));
        registry.register(Arc::new(CountingContainer {
            name,
            get_calls: get_calls.clone(),
        }));
        let wrapper = LazyComponent::new(
            registry.clone(),
            Arc::new(SharedScope::new()),
            name,
            "./App",
            quick_opts(),
        );
        (wrapper, get_calls)
    }

    #[tokio::test(start_paused = true)]
    async fn state_machine_walks_unloaded_pending_ready() {
        let registry = Arc::new(GlobalRegistry::new());
        let (wrapper, _) = wrapper_for(&registry, "orders");

        assert!(matches!(wrapper.state(), LoadState::Unloaded));
        wrapper.ensure_started();
        assert!(matches!(wrapper.state(), LoadState::Pending));

        let component = wrapper.resolve().await.unwrap();
        assert_eq!(component.render(), "board");
        assert!(matches!(wrapper.state(), LoadState::Ready(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_resolvers_share_one_load() {
        let registry = Arc::new(GlobalRegistry::new());
        let (wrapper, get_calls) = wrapper_for(&registry, "orders");

        let (a, b, c) = tokio::join!(wrapper.resolve(), wrapper.resolve(), wrapper.resolve());
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ready_is_terminal_and_cached() {
        let registry = Arc::new(GlobalRegistry::new());
        let (wrapper, get_calls) = wrapper_for(&registry, "orders");

        wrapper.resolve().await.unwrap();
        wrapper.resolve().await.unwrap();
        assert_eq!(get_calls.load(Ordering::SeqCst), 1);
        // Retry has no effect on a healthy wrapper.
        assert!(!wrapper.retry());
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_sticky_until_explicit_retry() {
        let registry = Arc::new(GlobalRegistry::new());
        let scope = Arc::new(SharedScope::new());
        let wrapper = LazyComponent::new(
            registry.clone(),
            scope,
            "ghost",
            "./App",
            quick_opts(),
        );

        let err = wrapper.resolve().await.err().unwrap();
        assert!(matches!(*err, LoadError::RemoteNotFound { .. }));
        assert!(matches!(wrapper.state(), LoadState::Failed(_)));

        // The remote shows up late; the wrapper stays failed until asked.
        let get_calls = Arc::new(AtomicU32::new(0));
        registry.register(Arc::new(CountingContainer {
            name: "ghost",
            get_calls: get_calls.clone(),
        }));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(matches!(wrapper.state(), LoadState::Failed(_)));

        assert!(wrapper.retry());
        let component = wrapper.resolve().await.unwrap();
        assert_eq!(component.render(), "board");
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_inflight_load() {
        let registry = Arc::new(GlobalRegistry::new());
        let get_calls = Arc::new(AtomicU32::new(0));

        let wrapper = LazyComponent::new(
            registry.clone(),
            Arc::new(SharedScope::new()),
            "late",
            "./App",
            quick_opts(),
        );
        wrapper.ensure_started();
        drop(wrapper);

        // The container arrives after teardown; the discarded settlement
        // must never reach it.
        registry.register(Arc::new(CountingContainer {
            name: "late",
            get_calls: get_calls.clone(),
        }));
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn ensure_started_is_idempotent() {
        let registry = Arc::new(GlobalRegistry::new());
        let (wrapper, get_calls) = wrapper_for(&registry, "orders");

        wrapper.ensure_started();
        wrapper.ensure_started();
        wrapper.ensure_started();
        wrapper.resolve().await.unwrap();
        assert_eq!(get_calls.load(Ordering::SeqCst), 1);
    }
}
