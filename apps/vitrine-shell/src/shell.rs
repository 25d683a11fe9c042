//! Composition shell: module selection, tenant routing, failure isolation.

use std::fmt::Write as _;
use std::sync::Arc;

use thiserror::Error;

use composekit::{
    Component, LazyComponent, LoadError, LoadOptions, LoadState, RegistryPort, SharedScope,
};
use tenancy::{TenantConfig, TenantError, TenantProvider, DEFAULT_TENANT};

use crate::modules::ModuleId;
use crate::settings::SettingsApp;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("module '{0}' is not available for the current tenant")]
    ModuleUnavailable(ModuleId),
}

/// One feature-gated navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavEntry {
    pub id: ModuleId,
    pub label: &'static str,
}

/// Outcome of tenant navigation: direct hit, or a silent redirect to the
/// default tenant for unknown ids.
#[derive(Debug)]
pub enum TenantRoute {
    Direct(Arc<TenantConfig>),
    Redirected {
        requested: String,
        tenant: Arc<TenantConfig>,
    },
}

enum Mounted {
    Remote(LazyComponent),
    Local(Arc<dyn Component>),
}

/// The composition shell. Exactly one module slot is mounted at a time;
/// each remote slot carries its own failure boundary so a broken module
/// never disturbs the header, navigation, or sibling slots.
pub struct Shell {
    registry: Arc<dyn RegistryPort>,
    scope: Arc<SharedScope>,
    tenants: Arc<TenantProvider>,
    load_opts: LoadOptions,
    active: ModuleId,
    mounted: Mounted,
}

impl Shell {
    pub fn new(
        registry: Arc<dyn RegistryPort>,
        scope: Arc<SharedScope>,
        tenants: Arc<TenantProvider>,
        load_opts: LoadOptions,
        initial: ModuleId,
    ) -> Result<Self, ShellError> {
        check_available(&tenants.current(), initial)?;
        let mounted = mount_for(&registry, &scope, &tenants, &load_opts, initial);
        Ok(Self {
            registry,
            scope,
            tenants,
            load_opts,
            active: initial,
            mounted,
        })
    }

    pub fn active(&self) -> ModuleId {
        self.active
    }

    pub fn tenants(&self) -> &Arc<TenantProvider> {
        &self.tenants
    }

    /// Load state of the active slot; `None` for local modules.
    pub fn active_state(&self) -> Option<LoadState> {
        match &self.mounted {
            Mounted::Remote(lazy) => Some(lazy.state()),
            Mounted::Local(_) => None,
        }
    }

    /// Feature-gated navigation entries for the current tenant.
    pub fn navigation(&self) -> Vec<NavEntry> {
        let tenant = self.tenants.current();
        ModuleId::ALL
            .into_iter()
            .filter(|id| is_available(&tenant, *id))
            .map(|id| NavEntry {
                id,
                label: id.label(),
            })
            .collect()
    }

    /// Switch the active module. Re-activating the current module is a no-op;
    /// otherwise the previous slot is dropped (cancelling any in-flight load)
    /// and a fresh wrapper starts back at `Unloaded`.
    pub fn activate(&mut self, id: ModuleId) -> Result<(), ShellError> {
        check_available(&self.tenants.current(), id)?;
        if self.active == id {
            return Ok(());
        }
        tracing::info!(module = %id, "Activating module");
        self.mounted = mount_for(&self.registry, &self.scope, &self.tenants, &self.load_opts, id);
        self.active = id;
        Ok(())
    }

    /// Route to a tenant by id. Unknown ids silently redirect to the default
    /// tenant instead of surfacing an error state. A switch that revokes the
    /// active module's feature falls back to the storefront.
    pub async fn navigate_tenant(&mut self, id: &str) -> Result<TenantRoute, TenantError> {
        let route = match self.tenants.load(id).await {
            Ok(tenant) => TenantRoute::Direct(tenant),
            Err(TenantError::NotFound { id: requested }) => {
                tracing::warn!(
                    tenant = %requested,
                    fallback = DEFAULT_TENANT,
                    "Unknown tenant, redirecting to default"
                );
                let tenant = self.tenants.load(DEFAULT_TENANT).await?;
                TenantRoute::Redirected { requested, tenant }
            }
        };

        if check_available(&self.tenants.current(), self.active).is_err() {
            tracing::info!(
                module = %self.active,
                "Active module gated off by tenant switch; falling back to storefront"
            );
            self.mounted = mount_for(
                &self.registry,
                &self.scope,
                &self.tenants,
                &self.load_opts,
                ModuleId::Storefront,
            );
            self.active = ModuleId::Storefront;
        }

        Ok(route)
    }

    /// Wait until the active slot reaches a terminal state. Local modules are
    /// immediately ready; a remote failure is reported, not propagated, since
    /// the slot renders its own boundary.
    pub async fn wait_active(&self) -> Result<(), Arc<LoadError>> {
        match &self.mounted {
            Mounted::Remote(lazy) => lazy.resolve().await.map(|_| ()),
            Mounted::Local(_) => Ok(()),
        }
    }

    /// Manual retry for a failed slot. Returns `false` when there is nothing
    /// to retry.
    pub fn retry_active(&self) -> bool {
        match &self.mounted {
            Mounted::Remote(lazy) => lazy.retry(),
            Mounted::Local(_) => false,
        }
    }

    /// Render the full shell frame: header, navigation, and the active slot
    /// behind its loading/failure boundary. The first render of a remote slot
    /// triggers its load.
    pub fn render_active(&self) -> String {
        let tenant = self.tenants.current();
        let mut out = String::new();

        let _ = writeln!(out, "==[ {} - {} ]==", tenant.branding.logo, tenant.branding.tagline);

        let nav: Vec<String> = self
            .navigation()
            .into_iter()
            .map(|entry| {
                if entry.id == self.active {
                    format!("[{}]", entry.label)
                } else {
                    entry.label.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "nav: {}", nav.join(" | "));

        let label = self.active.label();
        let _ = writeln!(out, "{} -> {}", tenant.branding.logo, label);

        match &self.mounted {
            Mounted::Local(component) => {
                out.push_str(&component.render());
            }
            Mounted::Remote(lazy) => {
                lazy.ensure_started();
                match lazy.state() {
                    LoadState::Unloaded | LoadState::Pending => {
                        let _ = writeln!(out, "Loading {label}...");
                    }
                    LoadState::Ready(component) => {
                        out.push_str(&component.render());
                    }
                    LoadState::Failed(err) => {
                        let _ = writeln!(out, "!! Module Loading Error");
                        let _ = writeln!(out, "Failed to load micro-frontend: {err}");
                        let _ = writeln!(out, "(use retry to attempt the load again)");
                    }
                }
            }
        }
        out
    }
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("active", &self.active)
            .field("tenant", &self.tenants.current().id)
            .finish()
    }
}

fn is_available(tenant: &TenantConfig, id: ModuleId) -> bool {
    id.required_feature()
        .map(|feature| tenant.features.is_enabled(feature))
        .unwrap_or(true)
}

fn check_available(tenant: &TenantConfig, id: ModuleId) -> Result<(), ShellError> {
    if is_available(tenant, id) {
        Ok(())
    } else {
        Err(ShellError::ModuleUnavailable(id))
    }
}

fn mount_for(
    registry: &Arc<dyn RegistryPort>,
    scope: &Arc<SharedScope>,
    tenants: &Arc<TenantProvider>,
    load_opts: &LoadOptions,
    id: ModuleId,
) -> Mounted {
    match id.remote_name() {
        Some(remote) => Mounted::Remote(LazyComponent::new(
            registry.clone(),
            scope.clone(),
            remote,
            "./App",
            load_opts.clone(),
        )),
        None => Mounted::Local(Arc::new(SettingsApp::new(tenants.clone()))),
    }
}
