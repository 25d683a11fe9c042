//! Remote module loader: discovery, shared-scope handshake, factory retrieval.

use std::sync::Arc;
use std::time::Duration;

use crate::contracts::{Component, ContainerError, InitResult};
use crate::errors::LoadError;
use crate::registry::{await_remote, DiscoveryOptions, RegistryPort};
use crate::scope::SharedScope;

/// Bounds for a full remote load.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub discovery: DiscoveryOptions,
    /// Upper bound for the container's `init` and `get` steps so a stuck
    /// initializer cannot hang the slot forever.
    pub init_timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            discovery: DiscoveryOptions::default(),
            init_timeout: Duration::from_millis(5000),
        }
    }
}

/// A successfully loaded remote module, normalized to one mountable component.
pub struct LoadedModule {
    pub remote: String,
    pub module_path: String,
    pub component: Arc<dyn Component>,
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("remote", &self.remote)
            .field("module_path", &self.module_path)
            .finish()
    }
}

/// Load one exposed module out of a named remote container.
///
/// The sequence is strictly sequential: discovery, `init` with the caller's
/// shared scope (synchronous and deferred initializers are normalized into a
/// single awaited completion), `get(module_path)`, one factory invocation,
/// default-export normalization. There are no retries at this layer; retry
/// policy belongs to the caller's failure boundary.
pub async fn load_remote(
    registry: &dyn RegistryPort,
    scope: Arc<SharedScope>,
    name: &str,
    module_path: &str,
    opts: &LoadOptions,
) -> Result<LoadedModule, LoadError> {
    let container = await_remote(registry, name, &opts.discovery).await?;

    let init_outcome = match container.init(scope) {
        InitResult::Done(result) => result,
        InitResult::Deferred(fut) => tokio::time::timeout(opts.init_timeout, fut)
            .await
            .map_err(|_| LoadError::InitTimeout {
                name: name.to_string(),
                waited_ms: opts.init_timeout.as_millis() as u64,
            })?,
    };
    init_outcome.map_err(|source| LoadError::RemoteInitFailed {
        name: name.to_string(),
        source,
    })?;

    let factory = tokio::time::timeout(opts.init_timeout, container.get(module_path))
        .await
        .map_err(|_| LoadError::InitTimeout {
            name: name.to_string(),
            waited_ms: opts.init_timeout.as_millis() as u64,
        })?
        .map_err(|source| match source {
            ContainerError::ModuleNotFound(path) => LoadError::RemoteModuleNotFound {
                name: name.to_string(),
                path,
            },
            other => LoadError::RemoteInitFailed {
                name: name.to_string(),
                source: other,
            },
        })?;

    let component = factory.invoke().into_component();
    tracing::debug!(remote = name, module_path, "Remote module loaded");

    Ok(LoadedModule {
        remote: name.to_string(),
        module_path: module_path.to_string(),
        component,
    })
}
