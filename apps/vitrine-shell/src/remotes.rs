//! Remote bundle delivery: simulates independently built bundles arriving and
//! registering themselves on the process-wide namespace.

use std::sync::Arc;
use std::time::Duration;

use composekit::GlobalRegistry;
use vitrine_bootstrap::AppConfig;

// Ensure remote bundles are linked and submitted via inventory
#[allow(dead_code)]
fn _ensure_remotes_linked() {
    let _ = std::any::type_name::<storefront::StorefrontContainer>();
    let _ = std::any::type_name::<catalog::CatalogContainer>();
    let _ = std::any::type_name::<orders::OrdersContainer>();
    let _ = std::any::type_name::<analytics::AnalyticsContainer>();
}

/// Spawn one delivery task per linked, enabled bundle. Each task sleeps for
/// the bundle's (configurable) delivery delay and then registers the built
/// container, exactly as an asynchronously loaded script would.
///
/// Returns the number of deliveries spawned.
pub fn spawn_deliveries(registry: Arc<GlobalRegistry>, config: &AppConfig) -> usize {
    let mut spawned = 0;
    for bundle in composekit::bundles() {
        if !config.remote_enabled(bundle.name) {
            tracing::info!(remote = bundle.name, "Remote delivery disabled by config");
            continue;
        }
        let delay = Duration::from_millis(config.remote_delay_ms(bundle.name, bundle.default_delay_ms));
        let registry = registry.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            registry.register((bundle.build)());
            tracing::debug!(remote = bundle.name, delay_ms = delay.as_millis() as u64, "Remote delivered");
        });
        spawned += 1;
    }
    spawned
}
