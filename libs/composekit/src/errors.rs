use thiserror::Error;

use crate::contracts::ContainerError;

/// Structured errors for remote discovery and loading.
///
/// Errors propagate to the failure boundary scoped to a single module slot;
/// they never cross into sibling slots or the shell frame.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("remote '{name}' not found in registry after {attempts} attempts")]
    RemoteNotFound { name: String, attempts: u32 },

    #[error("remote '{name}' failed to initialize")]
    RemoteInitFailed {
        name: String,
        #[source]
        source: ContainerError,
    },

    #[error("remote '{name}' does not expose module '{path}'")]
    RemoteModuleNotFound { name: String, path: String },

    #[error("remote '{name}' initializer did not settle within {waited_ms}ms")]
    InitTimeout { name: String, waited_ms: u64 },

    #[error("load of remote '{name}' was cancelled")]
    Cancelled { name: String },
}
