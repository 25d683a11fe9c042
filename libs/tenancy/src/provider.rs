//! Process-wide tenant provider.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use dashmap::DashMap;
use thiserror::Error;

use crate::config::TenantConfig;
use crate::style::{apply_theme, StyleTarget};

/// Structured errors for tenant resolution.
///
/// `NotFound` is recovered locally by the shell (redirect to the default
/// tenant), never surfaced to the user as an error state.
#[derive(Debug, Error)]
pub enum TenantError {
    #[error("tenant '{id}' not found")]
    NotFound { id: String },
}

/// Owns the tenant catalog and the currently active tenant.
///
/// The current tenant is replaced wholesale on switch or save; reads are
/// cheap snapshots through `ArcSwap`. Every mutation re-applies the tenant
/// theme to the injected style target so all mounted modules observe the
/// switch.
pub struct TenantProvider {
    catalog: DashMap<String, Arc<TenantConfig>>,
    current: ArcSwap<TenantConfig>,
    style: Arc<dyn StyleTarget>,
    switch_latency: Duration,
}

impl TenantProvider {
    /// Build a provider over `tenants`, activating `default_id` immediately.
    pub fn new(
        tenants: Vec<TenantConfig>,
        default_id: &str,
        style: Arc<dyn StyleTarget>,
        switch_latency: Duration,
    ) -> Result<Self, TenantError> {
        let catalog = DashMap::new();
        for t in tenants {
            catalog.insert(t.id.clone(), Arc::new(t));
        }
        let initial = catalog
            .get(default_id)
            .map(|e| e.value().clone())
            .ok_or_else(|| TenantError::NotFound {
                id: default_id.to_string(),
            })?;
        apply_theme(style.as_ref(), &initial.theme);

        Ok(Self {
            catalog,
            current: ArcSwap::new(initial),
            style,
            switch_latency,
        })
    }

    /// Snapshot of the active tenant.
    pub fn current(&self) -> Arc<TenantConfig> {
        self.current.load_full()
    }

    pub fn known_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.catalog.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn get(&self, id: &str) -> Option<Arc<TenantConfig>> {
        self.catalog.get(id).map(|e| e.value().clone())
    }

    /// Switch the active tenant. Simulates load latency, then swaps the
    /// current tenant wholesale and applies its theme.
    pub async fn load(&self, id: &str) -> Result<Arc<TenantConfig>, TenantError> {
        tokio::time::sleep(self.switch_latency).await;

        let tenant = self.get(id).ok_or_else(|| TenantError::NotFound {
            id: id.to_string(),
        })?;
        self.current.store(tenant.clone());
        apply_theme(self.style.as_ref(), &tenant.theme);
        tracing::info!(tenant = %tenant.id, "Tenant activated");
        Ok(tenant)
    }

    /// Configuration save: replace the stored record wholesale. When the
    /// updated tenant is the active one, the swap and theme re-application
    /// are immediate.
    pub fn update(&self, tenant: TenantConfig) {
        let id = tenant.id.clone();
        let tenant = Arc::new(tenant);
        self.catalog.insert(id.clone(), tenant.clone());

        if self.current.load().id == id {
            self.current.store(tenant.clone());
            apply_theme(self.style.as_ref(), &tenant.theme);
        }
        tracing::info!(tenant = %id, "Tenant configuration updated");
    }
}

impl std::fmt::Debug for TenantProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TenantProvider")
            .field("current", &self.current.load().id)
            .field("known", &self.known_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_tenants, DEFAULT_TENANT};
    use crate::style::MemoryStyleTarget;

    fn provider(style: Arc<MemoryStyleTarget>) -> TenantProvider {
        TenantProvider::new(
            builtin_tenants(),
            DEFAULT_TENANT,
            style,
            Duration::from_millis(500),
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn load_swaps_current_and_applies_theme() {
        let style = Arc::new(MemoryStyleTarget::new());
        let p = provider(style.clone());
        assert_eq!(p.current().id, DEFAULT_TENANT);

        let loaded = p.load("fashion-store").await.unwrap();
        assert_eq!(loaded.id, "fashion-store");
        assert_eq!(p.current().id, "fashion-store");
        assert_eq!(
            style.get_variable("--tenant-primary").as_deref(),
            Some("#ec4899")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_tenant_is_not_found_and_current_is_kept() {
        let style = Arc::new(MemoryStyleTarget::new());
        let p = provider(style);

        let err = p.load("nonexistent").await.unwrap_err();
        assert!(matches!(err, TenantError::NotFound { .. }));
        assert_eq!(p.current().id, DEFAULT_TENANT);
    }

    #[tokio::test(start_paused = true)]
    async fn update_replaces_wholesale_and_reapplies_theme() {
        let style = Arc::new(MemoryStyleTarget::new());
        let p = provider(style.clone());

        let mut edited = (*p.current()).clone();
        edited.branding.logo = "MegaBazar".to_string();
        edited.theme.primary = "#000000".to_string();
        p.update(edited);

        let current = p.current();
        assert_eq!(current.branding.logo, "MegaBazar");
        assert_eq!(
            style.get_variable("--tenant-primary").as_deref(),
            Some("#000000")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn updating_an_inactive_tenant_leaves_current_alone() {
        let style = Arc::new(MemoryStyleTarget::new());
        let p = provider(style.clone());

        let mut other = (*p.get("book-corner").unwrap()).clone();
        other.theme.primary = "#ffffff".to_string();
        p.update(other);

        assert_eq!(p.current().id, DEFAULT_TENANT);
        // Active theme untouched.
        assert_eq!(
            style.get_variable("--tenant-primary").as_deref(),
            Some("#6366f1")
        );
    }

    #[test]
    fn provider_requires_a_known_default() {
        let err = TenantProvider::new(
            builtin_tenants(),
            "ghost-tenant",
            Arc::new(MemoryStyleTarget::new()),
            Duration::ZERO,
        )
        .unwrap_err();
        assert!(matches!(err, TenantError::NotFound { .. }));
    }
}
