//! Compile-time registration of remote bundles.
//!
//! A bundle describes how a remote's container is built and how long its
//! simulated delivery takes; the shell discovers linked bundles via
//! `inventory` and spawns their deliveries at boot.

use std::sync::Arc;

use crate::contracts::RemoteContainer;

/// One linkable remote bundle. Submitted by each remote module crate via
/// `inventory::submit!`.
pub struct RemoteBundle {
    pub name: &'static str,
    /// Simulated delivery latency before the container self-registers,
    /// overridable per remote in the shell configuration.
    pub default_delay_ms: u64,
    pub build: fn() -> Arc<dyn RemoteContainer>,
}

inventory::collect!(RemoteBundle);

/// All remote bundles linked into the current binary.
pub fn bundles() -> impl Iterator<Item = &'static RemoteBundle> {
    inventory::iter::<RemoteBundle>.into_iter()
}

/// Look up a linked bundle by remote name.
pub fn find_bundle(name: &str) -> Option<&'static RemoteBundle> {
    bundles().find(|b| b.name == name)
}
