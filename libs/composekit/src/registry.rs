//! Remote container registry: injectable port, process-wide adapter, and
//! bounded discovery.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use tokio::sync::watch;

use crate::contracts::RemoteContainer;
use crate::errors::LoadError;

/// Injectable lookup port for remote containers.
///
/// Production code goes through the process-wide [`GlobalRegistry`]; tests
/// inject fresh instances or counting fakes instead of reaching for a hidden
/// global.
pub trait RegistryPort: Send + Sync {
    fn lookup(&self, name: &str) -> Option<Arc<dyn RemoteContainer>>;

    /// Optional push channel: a generation counter bumped on every
    /// registration. Ports that cannot observe registrations return `None`
    /// and discovery falls back to pure polling.
    fn registrations(&self) -> Option<watch::Receiver<u64>> {
        None
    }
}

/// The process-wide container namespace. Entries live for the lifetime of the
/// process and are replaced on re-registration, never destroyed.
pub struct GlobalRegistry {
    containers: DashMap<String, Arc<dyn RemoteContainer>>,
    events: watch::Sender<u64>,
}

impl GlobalRegistry {
    pub fn new() -> Self {
        let (events, _) = watch::channel(0);
        Self {
            containers: DashMap::new(),
            events,
        }
    }

    /// Register (or replace) a container under its declared name and notify
    /// push-mode waiters.
    pub fn register(&self, container: Arc<dyn RemoteContainer>) {
        let name = container.name().to_string();
        let replaced = self.containers.insert(name.clone(), container).is_some();
        self.events.send_modify(|generation| *generation += 1);
        tracing::info!(remote = %name, replaced, "Remote container registered");
    }

    pub fn contains(&self, name: &str) -> bool {
        self.containers.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.containers.iter().map(|e| e.key().clone()).collect()
    }
}

impl Default for GlobalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GlobalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalRegistry")
            .field("containers", &self.names())
            .finish()
    }
}

impl RegistryPort for GlobalRegistry {
    fn lookup(&self, name: &str) -> Option<Arc<dyn RemoteContainer>> {
        self.containers.get(name).map(|e| e.value().clone())
    }

    fn registrations(&self) -> Option<watch::Receiver<u64>> {
        Some(self.events.subscribe())
    }
}

static GLOBAL: Lazy<Arc<GlobalRegistry>> = Lazy::new(|| Arc::new(GlobalRegistry::new()));

/// The shared process-wide registry instance.
pub fn global() -> Arc<GlobalRegistry> {
    GLOBAL.clone()
}

/// Bounds for remote discovery.
#[derive(Clone, Debug)]
pub struct DiscoveryOptions {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_attempts: 20,
            interval: Duration::from_millis(250),
        }
    }
}

/// Wait for a named container to appear in the registry.
///
/// The portable baseline is a bounded poll: up to `max_attempts` lookups
/// spaced `interval` apart, failing with [`LoadError::RemoteNotFound`] once
/// the budget is exhausted; no further lookups occur after that. When the
/// port exposes a registration channel, events short-circuit the wait between
/// polls; the overall deadline of `max_attempts x interval` is unchanged.
pub async fn await_remote(
    registry: &dyn RegistryPort,
    name: &str,
    opts: &DiscoveryOptions,
) -> Result<Arc<dyn RemoteContainer>, LoadError> {
    let mut events = registry.registrations();
    let mut attempts: u32 = 0;
    let mut next_tick = tokio::time::Instant::now() + opts.interval;

    loop {
        if attempts >= opts.max_attempts {
            return Err(LoadError::RemoteNotFound {
                name: name.to_string(),
                attempts,
            });
        }

        if let Some(container) = registry.lookup(name) {
            return Ok(container);
        }

        let mut channel_closed = false;
        match &mut events {
            Some(rx) => {
                tokio::select! {
                    _ = tokio::time::sleep_until(next_tick) => {
                        attempts += 1;
                        next_tick += opts.interval;
                    }
                    changed = rx.changed() => {
                        channel_closed = changed.is_err();
                    }
                }
            }
            None => {
                tokio::time::sleep_until(next_tick).await;
                attempts += 1;
                next_tick += opts.interval;
            }
        }
        // A closed channel degrades to pure polling.
        if channel_closed {
            events = None;
        }
    }
}
